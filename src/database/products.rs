use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::product::{NewProduct, Product, ProductWithCategory};
use crate::types::{Page, PageRequest};

const SELECT_WITH_CATEGORY: &str = "SELECT p.id, p.name, p.title, p.price, p.category_id, \
     p.description, p.image, p.rating, c.name AS category_name \
     FROM products p LEFT JOIN categories c ON c.id = p.category_id";

/// Optional list filters; every present field narrows the result
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub category_id: Option<i64>,
    pub search: Option<String>,
}

impl ProductFilter {
    /// Substring pattern for LIKE, with wildcards in the search text escaped.
    /// Case folding happens in SQL on both sides. Blank searches impose no
    /// condition.
    pub fn search_pattern(&self) -> Option<String> {
        let term = self.search.as_deref()?.trim();
        if term.is_empty() {
            return None;
        }

        let mut escaped = String::with_capacity(term.len() + 2);
        escaped.push('%');
        for ch in term.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                escaped.push('\\');
            }
            escaped.push(ch);
        }
        escaped.push('%');
        Some(escaped)
    }

    fn push_conditions(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        qb.push(" WHERE 1 = 1");

        if let Some(category_id) = self.category_id {
            qb.push(" AND p.category_id = ").push_bind(category_id);
        }

        if let Some(pattern) = self.search_pattern() {
            qb.push(" AND (LOWER(p.name) LIKE LOWER(")
                .push_bind(pattern.clone())
                .push(") ESCAPE '\\' OR LOWER(p.title) LIKE LOWER(")
                .push_bind(pattern)
                .push(") ESCAPE '\\')");
        }
    }
}

/// Filtered page of products ordered by id, plus the total match count
pub async fn paginate(
    pool: &SqlitePool,
    filter: &ProductFilter,
    request: PageRequest,
) -> Result<Page<ProductWithCategory>, DatabaseError> {
    let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products p");
    filter.push_conditions(&mut count_qb);
    let (total,) = count_qb.build_query_as::<(i64,)>().fetch_one(pool).await?;

    let mut qb = QueryBuilder::<Sqlite>::new(SELECT_WITH_CATEGORY);
    filter.push_conditions(&mut qb);
    qb.push(" ORDER BY p.id LIMIT ")
        .push_bind(request.limit())
        .push(" OFFSET ")
        .push_bind(request.offset());

    let items = qb
        .build_query_as::<ProductWithCategory>()
        .fetch_all(pool)
        .await?;

    Ok(Page { items, total, request })
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<ProductWithCategory>, DatabaseError> {
    let product = sqlx::query_as::<_, ProductWithCategory>(&format!(
        "{SELECT_WITH_CATEGORY} WHERE p.id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(product)
}

pub async fn get_404(pool: &SqlitePool, id: i64) -> Result<ProductWithCategory, DatabaseError> {
    find(pool, id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Product not found".to_string()))
}

pub async fn insert(pool: &SqlitePool, product: NewProduct) -> Result<i64, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO products (name, title, price, category_id, description, image, rating)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&product.name)
    .bind(&product.title)
    .bind(product.price)
    .bind(product.category_id)
    .bind(&product.description)
    .bind(&product.image)
    .bind(product.rating)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_constraint(e, "Invalid category"))?;

    Ok(result.last_insert_rowid())
}

/// Write every mutable column of `product` back to its row
pub async fn update(pool: &SqlitePool, product: &Product) -> Result<(), DatabaseError> {
    let result = sqlx::query(
        "UPDATE products
         SET name = ?, title = ?, price = ?, category_id = ?, description = ?, image = ?, rating = ?
         WHERE id = ?",
    )
    .bind(&product.name)
    .bind(&product.title)
    .bind(product.price)
    .bind(product.category_id)
    .bind(&product.description)
    .bind(&product.image)
    .bind(product.rating)
    .bind(product.id)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_constraint(e, "Invalid category"))?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("Product not found".to_string()));
    }
    Ok(())
}

pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM products WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("Product not found".to_string()));
    }
    Ok(())
}

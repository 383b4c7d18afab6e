use sqlx::SqlitePool;

use crate::database::manager::DatabaseError;
use crate::database::models::category::{Category, NewCategory};

pub async fn list(pool: &SqlitePool) -> Result<Vec<Category>, DatabaseError> {
    let categories = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, image FROM categories ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

pub async fn find(pool: &SqlitePool, id: i64) -> Result<Option<Category>, DatabaseError> {
    let category = sqlx::query_as::<_, Category>(
        "SELECT id, name, description, image FROM categories WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(category)
}

pub async fn get_404(pool: &SqlitePool, id: i64) -> Result<Category, DatabaseError> {
    find(pool, id)
        .await?
        .ok_or_else(|| DatabaseError::NotFound("Category not found".to_string()))
}

pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, DatabaseError> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(found.is_some())
}

pub async fn insert(pool: &SqlitePool, category: NewCategory) -> Result<i64, DatabaseError> {
    let result = sqlx::query("INSERT INTO categories (name, description, image) VALUES (?, ?, ?)")
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.image)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Write every mutable column of `category` back to its row
pub async fn update(pool: &SqlitePool, category: &Category) -> Result<(), DatabaseError> {
    let result = sqlx::query("UPDATE categories SET name = ?, description = ?, image = ? WHERE id = ?")
        .bind(&category.name)
        .bind(&category.description)
        .bind(&category.image)
        .bind(category.id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("Category not found".to_string()));
    }
    Ok(())
}

/// Delete a category. Categories that still own products are kept and
/// reported as `Conflict`.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<(), DatabaseError> {
    let product_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE category_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;

    if product_count > 0 {
        return Err(DatabaseError::Conflict(format!(
            "Category still has {} product(s)",
            product_count
        )));
    }

    let result = sqlx::query("DELETE FROM categories WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .map_err(|e| DatabaseError::from_constraint(e, "Category still has products"))?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("Category not found".to_string()));
    }
    Ok(())
}

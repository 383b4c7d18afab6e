use chrono::Utc;
use sqlx::{Sqlite, SqlitePool};

use crate::database::manager::DatabaseError;
use crate::database::models::cart::{CartItem, CartLine};

/// Upper bound for a single cart line, whether set directly or accumulated
pub const MAX_CART_QUANTITY: i64 = 1000;

pub(crate) const CART_LINES_SQL: &str = "SELECT ci.id, ci.product_id, ci.quantity, \
     p.name, p.title, p.price, p.image \
     FROM cart_items ci JOIN products p ON p.id = ci.product_id \
     WHERE ci.user_id = ? ORDER BY ci.id";

/// Cart lines for `user_id`, joined with current product data
pub async fn list_lines<'e, E>(executor: E, user_id: i64) -> Result<Vec<CartLine>, DatabaseError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let lines = sqlx::query_as::<_, CartLine>(CART_LINES_SQL)
        .bind(user_id)
        .fetch_all(executor)
        .await?;

    Ok(lines)
}

/// Add `quantity` of a product; an existing line for the same product grows
/// instead of being duplicated. A line never grows past `MAX_CART_QUANTITY`.
pub async fn add_item(
    pool: &SqlitePool,
    user_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<CartItem, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO cart_items (user_id, product_id, quantity, created_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT (user_id, product_id) DO UPDATE SET quantity = quantity + excluded.quantity
         WHERE cart_items.quantity + excluded.quantity <= ?",
    )
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .bind(Utc::now())
    .bind(MAX_CART_QUANTITY)
    .execute(pool)
    .await
    .map_err(|e| DatabaseError::from_constraint(e, "Product no longer available"))?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::Invalid(format!(
            "Quantity cannot exceed {}",
            MAX_CART_QUANTITY
        )));
    }

    let item = sqlx::query_as::<_, CartItem>(
        "SELECT id, user_id, product_id, quantity, created_at
         FROM cart_items WHERE user_id = ? AND product_id = ?",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;

    Ok(item)
}

pub async fn set_quantity(
    pool: &SqlitePool,
    user_id: i64,
    item_id: i64,
    quantity: i64,
) -> Result<(), DatabaseError> {
    let result = sqlx::query("UPDATE cart_items SET quantity = ? WHERE id = ? AND user_id = ?")
        .bind(quantity)
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("Cart item not found".to_string()));
    }
    Ok(())
}

pub async fn remove_item(pool: &SqlitePool, user_id: i64, item_id: i64) -> Result<(), DatabaseError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE id = ? AND user_id = ?")
        .bind(item_id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound("Cart item not found".to_string()));
    }
    Ok(())
}

/// Empty the cart, returning how many lines were removed
pub async fn clear<'e, E>(executor: E, user_id: i64) -> Result<u64, DatabaseError>
where
    E: sqlx::Executor<'e, Database = Sqlite>,
{
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = ?")
        .bind(user_id)
        .execute(executor)
        .await?;

    Ok(result.rows_affected())
}

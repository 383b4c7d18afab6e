use chrono::Utc;
use sqlx::SqlitePool;
use std::collections::HashMap;

use crate::database::carts;
use crate::database::manager::DatabaseError;
use crate::database::models::order::{NewOrder, Order, OrderItem, STATUS_PENDING};

const ORDER_COLUMNS: &str =
    "id, user_id, status, total, shipping_address, billing_address, payment_method, created_at";

/// Turn the caller's cart into an order in one transaction: snapshot every
/// line, store the order, empty the cart. Returns `None` for an empty cart.
pub async fn place_order(
    pool: &SqlitePool,
    user_id: i64,
    order: NewOrder,
) -> Result<Option<Order>, DatabaseError> {
    let mut tx = pool.begin().await?;

    let lines = carts::list_lines(&mut *tx, user_id).await?;
    if lines.is_empty() {
        return Ok(None);
    }

    let total = round_cents(lines.iter().map(|line| line.subtotal()).sum());
    let created_at = Utc::now();

    let order_id = sqlx::query(
        "INSERT INTO orders
         (user_id, status, total, shipping_address, billing_address, payment_method, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(STATUS_PENDING)
    .bind(total)
    .bind(&order.shipping_address)
    .bind(&order.billing_address)
    .bind(&order.payment_method)
    .bind(created_at)
    .execute(&mut *tx)
    .await?
    .last_insert_rowid();

    for line in &lines {
        sqlx::query(
            "INSERT INTO order_items (order_id, product_id, product_name, unit_price, quantity)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(line.product_id)
        .bind(&line.title)
        .bind(line.price)
        .bind(line.quantity)
        .execute(&mut *tx)
        .await?;
    }

    carts::clear(&mut *tx, user_id).await?;
    tx.commit().await?;

    Ok(Some(Order {
        id: order_id,
        user_id,
        status: STATUS_PENDING.to_string(),
        total,
        shipping_address: order.shipping_address,
        billing_address: order.billing_address,
        payment_method: order.payment_method,
        created_at,
    }))
}

/// Orders of `user_id`, newest first, each with its line items
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: i64,
) -> Result<Vec<(Order, Vec<OrderItem>)>, DatabaseError> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = ? ORDER BY created_at DESC, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT oi.id, oi.order_id, oi.product_id, oi.product_name, oi.unit_price, oi.quantity
         FROM order_items oi JOIN orders o ON o.id = oi.order_id
         WHERE o.user_id = ? ORDER BY oi.id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for item in items {
        by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(orders
        .into_iter()
        .map(|order| {
            let items = by_order.remove(&order.id).unwrap_or_default();
            (order, items)
        })
        .collect())
}

/// A single order, only if it belongs to `user_id`
pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: i64,
    order_id: i64,
) -> Result<(Order, Vec<OrderItem>), DatabaseError> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ? AND user_id = ?"
    ))
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound("Order not found".to_string()))?;

    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, product_id, product_name, unit_price, quantity
         FROM order_items WHERE order_id = ? ORDER BY id",
    )
    .bind(order.id)
    .fetch_all(pool)
    .await?;

    Ok((order, items))
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

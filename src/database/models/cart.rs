use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartItem {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

/// Cart row joined with the current product data
#[derive(Debug, Clone, FromRow)]
pub struct CartLine {
    pub id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub name: String,
    pub title: String,
    pub price: f64,
    pub image: Option<String>,
}

impl CartLine {
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::types::deserialize_nullable;

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub price: f64,
    pub category_id: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
}

/// Product row joined with the name of its category
#[derive(Debug, Clone, FromRow)]
pub struct ProductWithCategory {
    #[sqlx(flatten)]
    pub product: Product,
    pub category_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub title: String,
    pub price: f64,
    pub category_id: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
}

/// Partial update: absent fields stay untouched, `null` clears a nullable field
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub rating: Option<Option<f64>>,
}

impl Product {
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category_id) = update.category_id {
            self.category_id = category_id;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(rating) = update.rating {
            self.rating = rating;
        }
    }
}

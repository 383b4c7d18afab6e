// handlers/elevated/products.rs - product management

use axum::{extract::State, Extension};
use serde::Deserialize;
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::api::views::{AdminProductView, ProductList};
use crate::api::{present, ApiJson, ApiPath, ApiQuery, ListQuery};
use crate::config;
use crate::database::models::{NewProduct, ProductUpdate};
use crate::database::{categories, products};
use crate::error::ApiError;
use crate::middleware::{AdminUser, ApiResponse, ApiResult, MessageBody};
use crate::state::AppState;

pub const MAX_RATING: f64 = 5.0;

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub title: Option<String>,
    pub price: Option<f64>,
    pub category_id: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub rating: Option<f64>,
}

impl CreateProductRequest {
    fn into_new_product(self) -> Result<NewProduct, ApiError> {
        let mut missing = Vec::new();
        let name = present(&self.name);
        let title = present(&self.title);
        if name.is_none() {
            missing.push("name");
        }
        if title.is_none() {
            missing.push("title");
        }
        if self.price.is_none() {
            missing.push("price");
        }
        if self.category_id.is_none() {
            missing.push("category_id");
        }

        match (name, title, self.price, self.category_id) {
            (Some(name), Some(title), Some(price), Some(category_id)) => {
                check_numbers(Some(price), self.rating)?;
                Ok(NewProduct {
                    name: name.to_string(),
                    title: title.to_string(),
                    price,
                    category_id,
                    description: self.description,
                    image: self.image,
                    rating: self.rating,
                })
            }
            _ => Err(ApiError::missing_fields(&missing)),
        }
    }
}

/// Price must be a non-negative number, rating within 0..=5
fn check_numbers(price: Option<f64>, rating: Option<f64>) -> Result<(), ApiError> {
    let mut field_errors = BTreeMap::new();

    if let Some(price) = price {
        if !price.is_finite() || price < 0.0 {
            field_errors.insert("price".to_string(), "Price must be zero or greater".to_string());
        }
    }
    if let Some(rating) = rating {
        if !(0.0..=MAX_RATING).contains(&rating) {
            field_errors.insert(
                "rating".to_string(),
                format!("Rating must be between 0 and {}", MAX_RATING),
            );
        }
    }

    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::validation_error("Invalid product data", Some(field_errors)))
    }
}

async fn check_category(pool: &SqlitePool, category_id: i64) -> Result<(), ApiError> {
    if categories::exists(pool, category_id).await? {
        Ok(())
    } else {
        Err(ApiError::bad_request("Invalid category"))
    }
}

/// GET /admin/products?page&per_page&search&category_id
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<ProductList<AdminProductView>> {
    let request = query.page_request(&config::config().api);
    let page = products::paginate(&state.db, &query.filter(), request).await?;

    Ok(ApiResponse::success(ProductList::from_page(page)))
}

/// POST /admin/products - `{name, title, price, category_id, description?, image?, rating?}`
pub async fn create(
    State(state): State<AppState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    ApiJson(payload): ApiJson<CreateProductRequest>,
) -> ApiResult<MessageBody> {
    let product = payload.into_new_product()?;
    check_category(&state.db, product.category_id).await?;

    let title = product.title.clone();
    let id = products::insert(&state.db, product).await?;

    tracing::info!("Admin {} created product {} ({})", admin.email, title, id);
    Ok(ApiResponse::created(MessageBody::with_id("Product created", id)))
}

/// GET /admin/products/:id
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<AdminProductView> {
    let row = products::get_404(&state.db, id).await?;
    Ok(ApiResponse::success(row.into()))
}

/// PUT /admin/products/:id - partial update
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<ProductUpdate>,
) -> ApiResult<MessageBody> {
    let blank = [("name", &update.name), ("title", &update.title)]
        .into_iter()
        .filter(|(_, value)| value.as_deref().is_some_and(|v| v.trim().is_empty()))
        .map(|(field, _)| field)
        .collect::<Vec<_>>();
    if !blank.is_empty() {
        return Err(ApiError::missing_fields(&blank));
    }
    check_numbers(update.price, update.rating.flatten())?;

    let mut product = products::get_404(&state.db, id).await?.product;
    if let Some(category_id) = update.category_id {
        check_category(&state.db, category_id).await?;
    }

    product.apply(update);
    products::update(&state.db, &product).await?;

    Ok(ApiResponse::success(MessageBody::with_id("Product updated", id)))
}

/// DELETE /admin/products/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<MessageBody> {
    products::delete(&state.db, id).await?;

    tracing::info!("Admin {} deleted product {}", admin.email, id);
    Ok(ApiResponse::success(MessageBody::with_id("Product deleted", id)))
}

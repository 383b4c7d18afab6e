// handlers/elevated/categories.rs - category management
//
// The single admin implementation of category CRUD. All routes sit behind
// the admin layer, so the body is never parsed for a non-admin caller.

use axum::{extract::State, Extension};
use serde::{Deserialize, Serialize};

use crate::api::views::AdminCategoryView;
use crate::api::{present, ApiJson, ApiPath};
use crate::database::categories;
use crate::database::models::{CategoryUpdate, NewCategory};
use crate::error::ApiError;
use crate::middleware::{AdminUser, ApiResponse, ApiResult, MessageBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: Vec<AdminCategoryView>,
}

/// GET /admin/categories
pub async fn list(State(state): State<AppState>) -> ApiResult<CategoryList> {
    let categories = categories::list(&state.db).await?;
    Ok(ApiResponse::success(CategoryList { categories }))
}

/// POST /admin/categories - `{name, description?, image?}`
pub async fn create(
    State(state): State<AppState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    ApiJson(payload): ApiJson<CreateCategoryRequest>,
) -> ApiResult<MessageBody> {
    let name = present(&payload.name).ok_or_else(|| ApiError::missing_fields(&["name"]))?;

    let id = categories::insert(
        &state.db,
        NewCategory {
            name: name.to_string(),
            description: payload.description,
            image: payload.image,
        },
    )
    .await?;

    tracing::info!("Admin {} created category {} ({})", admin.email, name, id);
    Ok(ApiResponse::created(MessageBody::with_id("Category created", id)))
}

/// GET /admin/categories/:id
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<AdminCategoryView> {
    let category = categories::get_404(&state.db, id).await?;
    Ok(ApiResponse::success(category))
}

/// PUT /admin/categories/:id - partial update; `null` clears description/image
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<CategoryUpdate>,
) -> ApiResult<MessageBody> {
    if update.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(ApiError::missing_fields(&["name"]));
    }

    let mut category = categories::get_404(&state.db, id).await?;
    category.apply(update);
    categories::update(&state.db, &category).await?;

    Ok(ApiResponse::success(MessageBody::with_id("Category updated", id)))
}

/// DELETE /admin/categories/:id - 409 while products still reference it
pub async fn delete(
    State(state): State<AppState>,
    Extension(AdminUser(admin)): Extension<AdminUser>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<MessageBody> {
    categories::delete(&state.db, id).await?;

    tracing::info!("Admin {} deleted category {}", admin.email, id);
    Ok(ApiResponse::success(MessageBody::with_id("Category deleted", id)))
}

// handlers/public/categories.rs - read-only category catalog

use axum::extract::State;
use serde::Serialize;

use crate::api::views::PublicCategoryView;
use crate::api::ApiPath;
use crate::database::categories;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: Vec<PublicCategoryView>,
}

/// GET /categories
pub async fn list(State(state): State<AppState>) -> ApiResult<CategoryList> {
    let categories = categories::list(&state.db)
        .await?
        .into_iter()
        .map(PublicCategoryView::from)
        .collect();

    Ok(ApiResponse::success(CategoryList { categories }))
}

/// GET /categories/:id
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<PublicCategoryView> {
    let category = categories::get_404(&state.db, id).await?;
    Ok(ApiResponse::success(category.into()))
}

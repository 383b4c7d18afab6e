// handlers/public/products.rs - read-only product catalog

use axum::extract::State;

use crate::api::views::{ProductList, PublicProductView};
use crate::api::{ApiPath, ApiQuery, ListQuery};
use crate::config;
use crate::database::products;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /products?page&per_page&category_id&search
///
/// `search` matches name or title, case-insensitively.
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> ApiResult<ProductList<PublicProductView>> {
    let request = query.page_request(&config::config().api);
    let page = products::paginate(&state.db, &query.filter(), request).await?;

    Ok(ApiResponse::success(ProductList::from_page(
        page.map(|row| row.product),
    )))
}

/// GET /products/:id
pub async fn show(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<PublicProductView> {
    let row = products::get_404(&state.db, id).await?;
    Ok(ApiResponse::success(row.product.into()))
}

// handlers/protected/cart.rs - the caller's shopping cart

use axum::{extract::State, Extension};
use serde::{Deserialize, Serialize};

use crate::api::views::CartLineView;
use crate::api::{ApiJson, ApiPath};
use crate::database::{carts, products};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser, MessageBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: Option<i64>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub quantity: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CartItemCreated {
    pub message: String,
    pub id: i64,
    pub quantity: i64,
}

fn check_quantity(quantity: i64) -> Result<i64, ApiError> {
    if quantity < 1 {
        return Err(ApiError::bad_request("Quantity must be at least 1"));
    }
    if quantity > carts::MAX_CART_QUANTITY {
        return Err(ApiError::bad_request(format!(
            "Quantity cannot exceed {}",
            carts::MAX_CART_QUANTITY
        )));
    }
    Ok(quantity)
}

/// GET /cart
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<CartLineView>> {
    let lines = carts::list_lines(&state.db, auth_user.user_id).await?;
    Ok(ApiResponse::success(
        lines.into_iter().map(CartLineView::from).collect(),
    ))
}

/// POST /cart - `{product_id, quantity?}`; re-adding a product grows its line
pub async fn add(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<AddToCartRequest>,
) -> ApiResult<CartItemCreated> {
    let product_id = payload
        .product_id
        .ok_or_else(|| ApiError::missing_fields(&["product_id"]))?;
    let quantity = check_quantity(payload.quantity.unwrap_or(1))?;

    products::get_404(&state.db, product_id).await?;
    let item = carts::add_item(&state.db, auth_user.user_id, product_id, quantity).await?;

    tracing::debug!(
        "User {} cart: product {} now x{}",
        auth_user.user_id,
        product_id,
        item.quantity
    );
    Ok(ApiResponse::created(CartItemCreated {
        message: "Added to cart".to_string(),
        id: item.id,
        quantity: item.quantity,
    }))
}

/// PUT /cart/:item_id - `{quantity}`
pub async fn update(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(item_id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateCartRequest>,
) -> ApiResult<MessageBody> {
    let quantity = payload
        .quantity
        .ok_or_else(|| ApiError::missing_fields(&["quantity"]))?;
    let quantity = check_quantity(quantity)?;

    carts::set_quantity(&state.db, auth_user.user_id, item_id, quantity).await?;
    Ok(ApiResponse::success(MessageBody::with_id("Cart updated", item_id)))
}

/// DELETE /cart/:item_id
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(item_id): ApiPath<i64>,
) -> ApiResult<MessageBody> {
    carts::remove_item(&state.db, auth_user.user_id, item_id).await?;
    Ok(ApiResponse::success(MessageBody::with_id("Item removed from cart", item_id)))
}

/// DELETE /cart
pub async fn clear(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<MessageBody> {
    let removed = carts::clear(&state.db, auth_user.user_id).await?;
    tracing::debug!("User {} cleared {} cart line(s)", auth_user.user_id, removed);
    Ok(ApiResponse::success(MessageBody::new("Cart cleared")))
}

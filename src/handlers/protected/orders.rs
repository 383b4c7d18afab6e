// handlers/protected/orders.rs - checkout and order history

use axum::{extract::State, Extension};
use serde::{Deserialize, Serialize};

use crate::api::views::OrderView;
use crate::api::{present, ApiJson, ApiPath};
use crate::database::models::NewOrder;
use crate::database::orders;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// Only `method` is kept; card numbers and other payment details sent by
/// the client are accepted and dropped.
#[derive(Debug, Deserialize)]
pub struct PaymentInfo {
    pub method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub shipping_address: Option<String>,
    pub billing_address: Option<String>,
    pub payment_info: Option<PaymentInfo>,
}

#[derive(Debug, Serialize)]
pub struct OrderPlaced {
    pub message: String,
    pub id: i64,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct OrderList {
    pub orders: Vec<OrderView>,
}

impl PlaceOrderRequest {
    fn into_new_order(self) -> Result<NewOrder, ApiError> {
        let method = self.payment_info.as_ref().and_then(|p| present(&p.method));

        match (present(&self.shipping_address), present(&self.billing_address), method) {
            (Some(shipping), Some(billing), Some(method)) => Ok(NewOrder {
                shipping_address: shipping.to_string(),
                billing_address: billing.to_string(),
                payment_method: method.to_string(),
            }),
            (shipping, billing, method) => {
                let missing: Vec<&str> = [
                    ("shipping_address", shipping.is_none()),
                    ("billing_address", billing.is_none()),
                    ("payment_info.method", method.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                Err(ApiError::missing_fields(&missing))
            }
        }
    }
}

/// POST /orders - turn the caller's cart into an order
pub async fn place(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiJson(payload): ApiJson<PlaceOrderRequest>,
) -> ApiResult<OrderPlaced> {
    let new_order = payload.into_new_order()?;

    let order = orders::place_order(&state.db, auth_user.user_id, new_order)
        .await?
        .ok_or_else(|| ApiError::bad_request("Cart is empty"))?;

    tracing::info!(
        "User {} placed order {} (total {:.2})",
        auth_user.user_id,
        order.id,
        order.total
    );
    Ok(ApiResponse::created(OrderPlaced {
        message: "Order placed".to_string(),
        id: order.id,
        total: order.total,
    }))
}

/// GET /orders - newest first
pub async fn list(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<OrderList> {
    let orders = orders::list_for_user(&state.db, auth_user.user_id)
        .await?
        .into_iter()
        .map(OrderView::from)
        .collect();

    Ok(ApiResponse::success(OrderList { orders }))
}

/// GET /orders/:id
pub async fn show(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ApiPath(order_id): ApiPath<i64>,
) -> ApiResult<OrderView> {
    let order = orders::find_for_user(&state.db, auth_user.user_id, order_id).await?;
    Ok(ApiResponse::success(order.into()))
}

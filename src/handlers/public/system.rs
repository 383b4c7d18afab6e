// handlers/public/system.rs - service banner and liveness

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager;
use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    Json(json!({
        "name": "Shop API",
        "version": env!("CARGO_PKG_VERSION"),
        "message": "Ecommerce Backend Running!",
        "endpoints": {
            "auth": "/auth/register, /auth/login (public), /auth/me (token)",
            "catalog": "/categories[/:id], /products[/:id] (public)",
            "cart": "/cart[/:item_id] (token)",
            "orders": "/orders[/:id] (token)",
            "admin": "/admin/login (public), /admin/* (admin token)",
        }
    }))
}

/// GET /health - database liveness
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match manager::health_check(&state.db).await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "degraded",
                    "timestamp": now,
                    "database": "unavailable"
                })),
            )
        }
    }
}

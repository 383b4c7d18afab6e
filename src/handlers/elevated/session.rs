// handlers/elevated/session.rs - POST /admin/login

use axum::extract::State;
use serde::Serialize;

use crate::api::ApiJson;
use crate::auth::{self, Claims};
use crate::error::ApiError;
use crate::handlers::public::auth::{verify_credentials, LoginRequest};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AdminToken {
    pub access_token: String,
}

/// POST /admin/login - like `/auth/login`, but valid credentials of a
/// non-admin account are refused with 403 instead of yielding a token.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<AdminToken> {
    let user = verify_credentials(&state.db, &payload).await?;

    if !user.is_admin {
        tracing::warn!("Non-admin {} attempted admin login", user.email);
        return Err(ApiError::admin_required());
    }

    let access_token = auth::generate_jwt(&Claims::new(user.id))?;
    tracing::info!("Admin {} logged in", user.email);

    Ok(ApiResponse::success(AdminToken { access_token }))
}

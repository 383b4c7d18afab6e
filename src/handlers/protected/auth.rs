// handlers/protected/auth.rs - GET /auth/me

use axum::{extract::State, Extension};

use crate::api::views::UserView;
use crate::database::users;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;

/// GET /auth/me - the account behind the bearer token
pub async fn whoami(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<UserView> {
    let user = users::find_by_id(&state.db, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::unauthorized("User no longer exists"))?;

    Ok(ApiResponse::success(UserView::from(&user)))
}

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::database::models::User;
use crate::database::users;
use crate::error::ApiError;
use crate::state::AppState;

use super::auth::AuthUser;

/// The caller's user row, reloaded and confirmed to hold admin rights
#[derive(Clone, Debug)]
pub struct AdminUser(pub User);

/// Runs after `jwt_auth_middleware`. Reloads the caller from the users table
/// and lets the request through only for admins; the handler (and its body
/// extractor) never runs otherwise.
pub async fn require_admin_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(auth_user) = request.extensions().get::<AuthUser>().copied() else {
        return ApiError::unauthorized("Authentication required").into_response();
    };

    let user = match users::find_by_id(&state.db, auth_user.user_id).await {
        Ok(user) => user,
        Err(err) => return ApiError::from(err).into_response(),
    };

    match user {
        Some(user) if user.is_admin => {
            tracing::debug!("Admin access granted to {} ({})", user.email, user.id);
            request.extensions_mut().insert(AdminUser(user));
            next.run(request).await
        }
        Some(user) => {
            tracing::warn!("User {} ({}) denied admin access", user.email, user.id);
            ApiError::admin_required().into_response()
        }
        None => {
            tracing::warn!("Token for unknown user id {} denied admin access", auth_user.user_id);
            ApiError::admin_required().into_response()
        }
    }
}

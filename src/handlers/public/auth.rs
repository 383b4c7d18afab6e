// handlers/public/auth.rs - account registration and token acquisition

use axum::extract::State;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

use crate::api::views::UserView;
use crate::api::{present, ApiJson};
use crate::auth::{self, Claims};
use crate::database::models::{NewUser, User};
use crate::database::users;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, MessageBody};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserView,
}

/// POST /auth/register - create a regular (non-admin) account
///
/// ```json
/// { "name": "Ada", "email": "ada@example.com", "password": "secret1" }
/// ```
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<MessageBody> {
    let (name, email, password) = match (
        present(&payload.name),
        present(&payload.email),
        payload.password.as_deref().filter(|p| !p.is_empty()),
    ) {
        (Some(name), Some(email), Some(password)) => (name, email, password),
        (name, email, password) => {
            let mut missing = Vec::new();
            if name.is_none() {
                missing.push("name");
            }
            if email.is_none() {
                missing.push("email");
            }
            if password.is_none() {
                missing.push("password");
            }
            return Err(ApiError::missing_fields(&missing));
        }
    };

    let mut field_errors = BTreeMap::new();
    if !is_valid_email(email) {
        field_errors.insert("email".to_string(), "Invalid email address".to_string());
    }
    if password.chars().count() < auth::MIN_PASSWORD_LEN {
        field_errors.insert(
            "password".to_string(),
            format!("Password must be at least {} characters", auth::MIN_PASSWORD_LEN),
        );
    }
    if !field_errors.is_empty() {
        return Err(ApiError::validation_error("Invalid registration data", Some(field_errors)));
    }

    let id = users::create_user(
        &state.db,
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password_hash: auth::hash_password(password)?,
            is_admin: false,
        },
    )
    .await?;

    tracing::info!("Registered user {} ({})", users::normalize_email(email), id);
    Ok(ApiResponse::created(MessageBody::with_id("User registered", id)))
}

/// POST /auth/login - exchange credentials for a bearer token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = verify_credentials(&state.db, &payload).await?;
    let access_token = auth::generate_jwt(&Claims::new(user.id))?;

    Ok(ApiResponse::success(LoginResponse {
        access_token,
        user: UserView::from(&user),
    }))
}

/// Shared by the user and admin login routes: 400 when either field is
/// missing, 401 when no account matches the email/password pair.
pub async fn verify_credentials(pool: &SqlitePool, payload: &LoginRequest) -> Result<User, ApiError> {
    let (email, password) = match (
        present(&payload.email),
        payload.password.as_deref().filter(|p| !p.is_empty()),
    ) {
        (Some(email), Some(password)) => (email, password),
        (email, password) => {
            let mut missing = Vec::new();
            if email.is_none() {
                missing.push("email");
            }
            if password.is_none() {
                missing.push("password");
            }
            return Err(ApiError::missing_fields(&missing));
        }
    };

    match users::find_by_email(pool, email).await? {
        Some(user) if auth::verify_password(password, &user.password_hash) => Ok(user),
        _ => {
            tracing::warn!("Failed login attempt for {}", email);
            Err(ApiError::unauthorized("Invalid credentials"))
        }
    }
}

/// Minimal shape check: one `@`, non-empty local part, dotted domain
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

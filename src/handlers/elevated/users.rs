// handlers/elevated/users.rs - GET /admin/users

use axum::extract::State;
use serde::Serialize;

use crate::api::views::UserView;
use crate::database::users;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<UserView>,
}

pub async fn list(State(state): State<AppState>) -> ApiResult<UserList> {
    let users = users::list_users(&state.db)
        .await?
        .iter()
        .map(UserView::from)
        .collect();

    Ok(ApiResponse::success(UserList { users }))
}

pub mod auth;
pub mod require_admin;
pub mod response;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use require_admin::{require_admin_middleware, AdminUser};
pub use response::{ApiResponse, ApiResult, MessageBody};

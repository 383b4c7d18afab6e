// handlers/elevated/mod.rs - Elevated handlers (admin required)
//
// Everything except `session::login` is mounted behind both
// `jwt_auth_middleware` and `require_admin_middleware`, so a handler here
// only runs once the caller's user row has been reloaded and confirmed as
// an admin. Handlers that need the admin record take `Extension<AdminUser>`.

pub mod categories; // /admin/categories[/:id]
pub mod products;   // /admin/products[/:id]
pub mod session;    // POST /admin/login
pub mod users;      // GET /admin/users

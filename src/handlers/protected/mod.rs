// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Every route here runs behind `jwt_auth_middleware` and reads the caller
// from the injected `AuthUser`. Data is always scoped to that caller: a
// cart item or order belonging to someone else is reported as not found.

pub mod auth;   // GET /auth/me
pub mod cart;   // /cart[/:item_id]
pub mod orders; // /orders[/:id]

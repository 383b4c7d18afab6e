// handlers/public/mod.rs - Public handlers (no authentication)
//
// Token acquisition and read-only catalog endpoints. Projections returned
// here never include admin-only fields.

pub mod auth;       // POST /auth/register, POST /auth/login
pub mod categories; // GET /categories[/:id]
pub mod products;   // GET /products[/:id]
pub mod system;     // GET /, GET /health

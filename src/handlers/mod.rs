// handlers/mod.rs - 3-tier handler architecture
//
// Public (no auth) → Protected (JWT auth) → Elevated (JWT auth + admin user)
//
// The tier of a handler decides which middleware the router wraps it in;
// handlers themselves only see the extensions those layers inject.
pub mod public;    // Tier 1: no authentication (/, /health, /auth/*, catalog reads)
pub mod protected; // Tier 2: JWT required (/auth/me, /cart, /orders)
pub mod elevated;  // Tier 3: JWT + is_admin required (/admin/*)

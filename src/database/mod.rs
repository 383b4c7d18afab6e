pub mod carts;
pub mod categories;
pub mod manager;
pub mod models;
pub mod orders;
pub mod products;
pub mod users;

pub use manager::DatabaseError;

pub mod cart;
pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{CartItem, CartLine};
pub use category::{Category, CategoryUpdate, NewCategory};
pub use order::{NewOrder, Order, OrderItem};
pub use product::{NewProduct, Product, ProductUpdate, ProductWithCategory};
pub use user::{NewUser, User};

//! Domain entities
pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::{Cart, CartItem};
pub use order::{Order, OrderStatus, PaymentStatus};
pub use product::{Product, ProductFilter};
pub use user::{Address, PublicUser, Role, User};

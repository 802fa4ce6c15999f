//! Persistence contracts.
//!
//! The catalog, identity and order stores are traits so the storage
//! engine is swappable; [`MemoryStore`] is the one concrete engine
//! carried by this crate and implements all three over a single lock.

pub mod memory;

pub use memory::MemoryStore;

use uuid::Uuid;

use crate::domain::{Address, Cart, Order, Product, ProductFilter, User};
use crate::error::ApiResult;

/// Partial update of a product's mutable fields.
#[derive(Clone, Debug, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<i64>,
    pub category: Option<String>,
    pub image: Option<String>,
    pub stock: Option<u32>,
    pub featured: Option<bool>,
}

pub trait CatalogStore: Send + Sync {
    /// Filtered page of products plus the total matching count,
    /// independent of the pagination window. `page` is 1-based.
    fn list(
        &self,
        filter: &ProductFilter,
        page: usize,
        page_size: usize,
    ) -> ApiResult<(Vec<Product>, usize)>;

    fn get(&self, id: Uuid) -> ApiResult<Product>;

    fn create(&self, product: Product) -> ApiResult<Product>;

    fn update(&self, id: Uuid, patch: ProductPatch) -> ApiResult<Product>;

    fn delete(&self, id: Uuid) -> ApiResult<()>;
}

pub trait IdentityStore: Send + Sync {
    /// Inserts a new user; fails with `Conflict` when the email is
    /// already registered. Uniqueness is checked before the insert.
    fn insert_user(&self, user: User) -> ApiResult<()>;

    fn find_by_email(&self, email: &str) -> ApiResult<Option<User>>;

    fn get_user(&self, id: Uuid) -> ApiResult<User>;

    fn cart(&self, user_id: Uuid) -> ApiResult<Cart>;

    /// Adds a snapshot of `product` to the user's cart, merging
    /// quantities when the product is already present. The merge runs
    /// under the store's write lock, so concurrent adds for the same
    /// user/product cannot lose an increment.
    fn add_cart_item(&self, user_id: Uuid, product: &Product, quantity: u32) -> ApiResult<Cart>;
}

pub trait OrderStore: Send + Sync {
    /// Converts the user's cart into a pending order and clears the
    /// cart. Fails with `Validation` when the cart is empty. The order
    /// insert and the cart clear commit together.
    fn place_order(
        &self,
        user_id: Uuid,
        shipping_address: Address,
        payment_method: String,
    ) -> ApiResult<Order>;

    fn order(&self, id: Uuid) -> ApiResult<Order>;
}

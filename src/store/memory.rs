//! In-memory storage engine.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::anyhow;
use uuid::Uuid;

use crate::domain::{Address, Cart, Order, Product, ProductFilter, User};
use crate::error::{ApiError, ApiResult};
use crate::store::{CatalogStore, IdentityStore, OrderStore, ProductPatch};

#[derive(Default)]
struct Tables {
    products: HashMap<Uuid, Product>,
    users: HashMap<Uuid, User>,
    users_by_email: HashMap<String, Uuid>,
    orders: HashMap<Uuid, Order>,
}

/// All tables live behind one lock, so multi-record effects such as
/// "insert order + clear cart" commit in a single critical section.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> ApiResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|_| ApiError::Internal(anyhow!("store lock poisoned")))
    }

    fn write(&self) -> ApiResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|_| ApiError::Internal(anyhow!("store lock poisoned")))
    }
}

impl CatalogStore for MemoryStore {
    fn list(
        &self,
        filter: &ProductFilter,
        page: usize,
        page_size: usize,
    ) -> ApiResult<(Vec<Product>, usize)> {
        let tables = self.read()?;
        let mut matching: Vec<Product> = tables
            .products
            .values()
            .filter(|p| p.matches(filter))
            .cloned()
            .collect();
        // newest first; id as tiebreak keeps pagination stable
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        let total = matching.len();
        let page = page.max(1);
        // offset saturates so an absurd requested page yields an empty
        // slice instead of overflowing
        let items = matching
            .into_iter()
            .skip((page - 1).saturating_mul(page_size))
            .take(page_size)
            .collect();
        Ok((items, total))
    }

    fn get(&self, id: Uuid) -> ApiResult<Product> {
        self.read()?
            .products
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("product not found".into()))
    }

    fn create(&self, product: Product) -> ApiResult<Product> {
        self.write()?.products.insert(product.id, product.clone());
        Ok(product)
    }

    fn update(&self, id: Uuid, patch: ProductPatch) -> ApiResult<Product> {
        let mut tables = self.write()?;
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound("product not found".into()))?;
        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(description) = patch.description {
            product.description = description;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }
        if let Some(category) = patch.category {
            product.category = category;
        }
        if let Some(image) = patch.image {
            product.image = image;
        }
        if let Some(stock) = patch.stock {
            product.stock = stock;
        }
        if let Some(featured) = patch.featured {
            product.featured = featured;
        }
        Ok(product.clone())
    }

    fn delete(&self, id: Uuid) -> ApiResult<()> {
        self.write()?
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound("product not found".into()))
    }
}

impl IdentityStore for MemoryStore {
    fn insert_user(&self, user: User) -> ApiResult<()> {
        let mut tables = self.write()?;
        if tables.users_by_email.contains_key(&user.email) {
            return Err(ApiError::Conflict("email already registered".into()));
        }
        tables.users_by_email.insert(user.email.clone(), user.id);
        tables.users.insert(user.id, user);
        Ok(())
    }

    fn find_by_email(&self, email: &str) -> ApiResult<Option<User>> {
        let tables = self.read()?;
        Ok(tables
            .users_by_email
            .get(email)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    fn get_user(&self, id: Uuid) -> ApiResult<User> {
        self.read()?
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("user not found".into()))
    }

    fn cart(&self, user_id: Uuid) -> ApiResult<Cart> {
        Ok(self.get_user(user_id)?.cart)
    }

    fn add_cart_item(&self, user_id: Uuid, product: &Product, quantity: u32) -> ApiResult<Cart> {
        let mut tables = self.write()?;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
        user.cart.add(product, quantity);
        Ok(user.cart.clone())
    }
}

impl OrderStore for MemoryStore {
    fn place_order(
        &self,
        user_id: Uuid,
        shipping_address: Address,
        payment_method: String,
    ) -> ApiResult<Order> {
        let mut tables = self.write()?;
        let user = tables
            .users
            .get_mut(&user_id)
            .ok_or_else(|| ApiError::NotFound("user not found".into()))?;
        if user.cart.is_empty() {
            return Err(ApiError::Validation("cart is empty".into()));
        }
        let items = user.cart.take_items();
        let order = Order::from_cart(user_id, items, shipping_address, payment_method);
        tables.orders.insert(order.id, order.clone());
        Ok(order)
    }

    fn order(&self, id: Uuid) -> ApiResult<Order> {
        self.read()?
            .orders
            .get(&id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound("order not found".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use std::sync::Arc;

    fn product(name: &str, category: &str, price: i64, featured: bool) -> Product {
        Product::new(name, "", price, category, "", 10, featured)
    }

    fn address() -> Address {
        Address {
            street: "1 Main St".into(),
            city: "Douala".into(),
            state: None,
            zip: "00000".into(),
            country: "CM".into(),
        }
    }

    fn user(store: &MemoryStore, email: &str) -> Uuid {
        let u = User::new("Test", email, "hash", Role::Customer);
        let id = u.id;
        store.insert_user(u).unwrap();
        id
    }

    #[test]
    fn list_total_is_independent_of_pagination() {
        let store = MemoryStore::new();
        for i in 0..5 {
            store
                .create(product(&format!("P{i}"), "widgets", 100, false))
                .unwrap();
        }
        store.create(product("Other", "gadgets", 100, false)).unwrap();

        let filter = ProductFilter {
            category: Some("widgets".into()),
            ..Default::default()
        };
        let (page1, total) = store.list(&filter, 1, 2).unwrap();
        assert_eq!(page1.len(), 2);
        assert_eq!(total, 5);
        let (page3, total) = store.list(&filter, 3, 2).unwrap();
        assert_eq!(page3.len(), 1);
        assert_eq!(total, 5);
    }

    #[test]
    fn huge_page_numbers_yield_an_empty_page() {
        let store = MemoryStore::new();
        store.create(product("P", "widgets", 100, false)).unwrap();
        let (items, total) = store.list(&ProductFilter::default(), usize::MAX, 100).unwrap();
        assert!(items.is_empty());
        assert_eq!(total, 1);
    }

    #[test]
    fn pages_do_not_overlap() {
        let store = MemoryStore::new();
        for i in 0..4 {
            store
                .create(product(&format!("P{i}"), "widgets", 100, false))
                .unwrap();
        }
        let filter = ProductFilter::default();
        let (page1, _) = store.list(&filter, 1, 2).unwrap();
        let (page2, _) = store.list(&filter, 2, 2).unwrap();
        let mut ids: Vec<Uuid> = page1.iter().chain(page2.iter()).map(|p| p.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn create_then_get_round_trips() {
        let store = MemoryStore::new();
        let created = store.create(product("Widget", "widgets", 4500, true)).unwrap();
        let fetched = store.get(created.id).unwrap();
        assert_eq!(fetched.name, "Widget");
        assert_eq!(fetched.price, 4500);
        assert!(fetched.featured);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let store = MemoryStore::new();
        let created = store.create(product("Widget", "widgets", 100, false)).unwrap();
        store.delete(created.id).unwrap();
        assert!(matches!(store.get(created.id), Err(ApiError::NotFound(_))));
        assert!(matches!(store.delete(created.id), Err(ApiError::NotFound(_))));
    }

    #[test]
    fn duplicate_email_conflicts_and_keeps_one_record() {
        let store = MemoryStore::new();
        user(&store, "dup@example.com");
        let second = User::new("Other", "dup@example.com", "hash2", Role::Customer);
        assert!(matches!(
            store.insert_user(second),
            Err(ApiError::Conflict(_))
        ));
        let found = store.find_by_email("dup@example.com").unwrap().unwrap();
        assert_eq!(found.name, "Test");
    }

    #[test]
    fn concurrent_adds_do_not_lose_increments() {
        let store = Arc::new(MemoryStore::new());
        let p = store.create(product("Widget", "widgets", 100, false)).unwrap();
        let uid = user(&store, "c@example.com");

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                let p = p.clone();
                std::thread::spawn(move || store.add_cart_item(uid, &p, 1).unwrap())
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let cart = store.cart(uid).unwrap();
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 8);
    }

    #[test]
    fn place_order_computes_total_and_clears_cart() {
        let store = MemoryStore::new();
        let a = store.create(product("A", "x", 100, false)).unwrap();
        let b = store.create(product("B", "x", 50, false)).unwrap();
        let uid = user(&store, "o@example.com");
        store.add_cart_item(uid, &a, 2).unwrap();
        store.add_cart_item(uid, &b, 1).unwrap();

        let order = store.place_order(uid, address(), "cash".into()).unwrap();
        assert_eq!(order.total_amount, 250);
        assert!(store.cart(uid).unwrap().is_empty());
        assert_eq!(store.order(order.id).unwrap().id, order.id);
    }

    #[test]
    fn place_order_on_empty_cart_is_rejected_without_an_order() {
        let store = MemoryStore::new();
        let uid = user(&store, "e@example.com");
        assert!(matches!(
            store.place_order(uid, address(), "cash".into()),
            Err(ApiError::Validation(_))
        ));
        assert!(store.read().unwrap().orders.is_empty());
    }

    #[test]
    fn order_items_are_frozen_against_later_price_changes() {
        let store = MemoryStore::new();
        let p = store.create(product("Widget", "x", 100, false)).unwrap();
        let uid = user(&store, "f@example.com");
        store.add_cart_item(uid, &p, 2).unwrap();

        let order = store.place_order(uid, address(), "card".into()).unwrap();
        store
            .update(
                p.id,
                ProductPatch {
                    price: Some(999),
                    ..Default::default()
                },
            )
            .unwrap();

        let stored = store.order(order.id).unwrap();
        assert_eq!(stored.items[0].price, 100);
        assert_eq!(stored.total_amount, 200);
    }
}

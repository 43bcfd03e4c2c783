// src/store.rs
//! In-process tables behind one coarse lock.
//!
//! Every mutation takes the write side of a single `RwLock`. Lookups take the
//! read side and hand back clones, so callers never hold on to table rows
//! past the call. Lookup misses are `None` or empty, never errors.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::Serialize;

use crate::errors::{AppError, Result};
use crate::models::bargain::Bargain;
use crate::models::notification::Notification;
use crate::models::order::Order;
use crate::models::payment::Payment;
use crate::models::product::{self, Product};
use crate::models::review::Review;
use crate::models::user::User;

#[derive(Debug, Default)]
pub struct Tables {
    pub users: HashMap<String, User>,
    pub user_phone_index: HashMap<String, String>,
    // Vec keeps insertion order for stable tie-breaking in listings.
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub payments: HashMap<String, Payment>,
    pub bargains: HashMap<String, Bargain>,
    pub reviews: Vec<Review>,
    pub notifications: Vec<Notification>,
}

impl Tables {
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn product_mut(&mut self, id: &str) -> Option<&mut Product> {
        self.products.iter_mut().find(|p| p.id == id)
    }

    pub fn order_mut(&mut self, id: &str) -> Option<&mut Order> {
        self.orders.iter_mut().find(|o| o.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreCounts {
    pub users: usize,
    pub products: usize,
    pub orders: usize,
    pub notifications: usize,
}

#[derive(Debug, Default)]
pub struct Store {
    tables: RwLock<Tables>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` against a consistent snapshot of all tables.
    pub fn read<R>(&self, f: impl FnOnce(&Tables) -> R) -> R {
        f(&self.tables.read())
    }

    /// Run `f` with exclusive access; multi-step transactions go through here.
    pub fn write<R>(&self, f: impl FnOnce(&mut Tables) -> R) -> R {
        f(&mut self.tables.write())
    }

    // ----- users -----

    /// Insert a user, rejecting a phone that is already registered.
    pub fn add_user(&self, user: User) -> Result<()> {
        self.write(|t| {
            if t.user_phone_index.contains_key(&user.phone) {
                return Err(AppError::DuplicatePhone(user.phone.clone()));
            }
            t.user_phone_index.insert(user.phone.clone(), user.id.clone());
            t.users.insert(user.id.clone(), user);
            Ok(())
        })
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.read(|t| t.users.get(user_id).cloned())
    }

    pub fn get_user_by_phone(&self, phone: &str) -> Option<User> {
        self.read(|t| {
            t.user_phone_index
                .get(phone)
                .and_then(|id| t.users.get(id))
                .cloned()
        })
    }

    pub fn list_users(&self) -> Vec<User> {
        let mut users: Vec<User> = self.read(|t| t.users.values().cloned().collect());
        users.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        users
    }

    // ----- products -----

    pub fn add_product(&self, product: Product) {
        self.write(|t| t.products.push(product));
    }

    pub fn get_product(&self, product_id: &str) -> Option<Product> {
        self.read(|t| t.product(product_id).cloned())
    }

    pub fn remove_product(&self, product_id: &str) -> Option<Product> {
        self.write(|t| {
            let idx = t.products.iter().position(|p| p.id == product_id)?;
            Some(t.products.remove(idx))
        })
    }

    pub fn all_products(&self) -> Vec<Product> {
        self.read(|t| t.products.clone())
    }

    /// Case-insensitive match on title, description or tags; empty keyword
    /// returns everything. Ordered by promotion rank, views, sold (desc).
    pub fn search_products(&self, keyword: &str) -> Vec<Product> {
        let needle = keyword.to_lowercase();
        let mut found: Vec<Product> = self.read(|t| {
            t.products
                .iter()
                .filter(|p| p.matches(&needle))
                .cloned()
                .collect()
        });
        product::sort_by_popularity(&mut found);
        found
    }

    // ----- orders & payments -----

    pub fn get_order(&self, order_id: &str) -> Option<Order> {
        self.read(|t| t.orders.iter().find(|o| o.id == order_id).cloned())
    }

    pub fn orders_for_buyer(&self, buyer_id: &str) -> Vec<Order> {
        self.read(|t| {
            t.orders
                .iter()
                .filter(|o| o.buyer_id == buyer_id)
                .cloned()
                .collect()
        })
    }

    pub fn add_payment(&self, payment: Payment) {
        self.write(|t| {
            t.payments.insert(payment.id.clone(), payment);
        });
    }

    pub fn get_payment(&self, payment_id: &str) -> Option<Payment> {
        self.read(|t| t.payments.get(payment_id).cloned())
    }

    // ----- bargains -----

    pub fn add_bargain(&self, bargain: Bargain) {
        self.write(|t| {
            t.bargains.insert(bargain.id.clone(), bargain);
        });
    }

    pub fn get_bargain(&self, bargain_id: &str) -> Option<Bargain> {
        self.read(|t| t.bargains.get(bargain_id).cloned())
    }

    // ----- reviews -----

    pub fn add_review(&self, review: Review) {
        self.write(|t| t.reviews.push(review));
    }

    pub fn reviews_for_product(&self, product_id: &str) -> Vec<Review> {
        self.read(|t| {
            t.reviews
                .iter()
                .filter(|r| r.product_id == product_id)
                .cloned()
                .collect()
        })
    }

    // ----- notifications -----

    pub fn add_notification(&self, notification: Notification) {
        self.write(|t| t.notifications.push(notification));
    }

    pub fn notifications_for(&self, user_id: &str) -> Vec<Notification> {
        self.read(|t| {
            t.notifications
                .iter()
                .filter(|n| n.user_id == user_id)
                .cloned()
                .collect()
        })
    }

    pub fn counts(&self) -> StoreCounts {
        self.read(|t| StoreCounts {
            users: t.users.len(),
            products: t.products.len(),
            orders: t.orders.len(),
            notifications: t.notifications.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::RoleProfile;
    use chrono::Utc;
    use std::collections::BTreeSet;

    fn user(id: &str, phone: &str) -> User {
        User {
            id: id.into(),
            phone: phone.into(),
            name: phone.into(),
            password_hash: "H:x".into(),
            created_at: Utc::now(),
            profile: RoleProfile::Buyer,
        }
    }

    fn product(id: &str, title: &str, tags: &[&str]) -> Product {
        Product {
            id: id.into(),
            merchant_id: "m_1".into(),
            title: title.into(),
            description: format!("{} description", title),
            price_cents: 100,
            stock: 5,
            allow_bargain: true,
            views: 0,
            sold: 0,
            promotion_rank: 0,
            tags: tags.iter().map(|t| t.to_string()).collect::<BTreeSet<_>>(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn lookup_misses_return_none() {
        let store = Store::new();
        assert!(store.get_user("nope").is_none());
        assert!(store.get_user_by_phone("nope").is_none());
        assert!(store.get_product("nope").is_none());
        assert!(store.get_order("nope").is_none());
        assert!(store.get_payment("nope").is_none());
        assert!(store.get_bargain("nope").is_none());
        assert!(store.notifications_for("nope").is_empty());
    }

    #[test]
    fn add_user_rejects_duplicate_phone() {
        let store = Store::new();
        store.add_user(user("u_1", "123")).unwrap();
        let err = store.add_user(user("u_2", "123")).unwrap_err();
        assert_eq!(err, AppError::DuplicatePhone("123".into()));
        assert_eq!(store.counts().users, 1);
        assert_eq!(store.get_user_by_phone("123").unwrap().id, "u_1");
    }

    #[test]
    fn search_matches_title_description_and_tags() {
        let store = Store::new();
        store.add_product(product("p_1", "Apple", &[]));
        store.add_product(product("p_2", "Lamp", &["Vintage"]));
        store.add_product(product("p_3", "Phone", &[]));

        assert_eq!(store.search_products("").len(), 3);
        assert_eq!(store.search_products("APPLE")[0].id, "p_1");
        assert_eq!(store.search_products("vintage")[0].id, "p_2");
        assert_eq!(store.search_products("phone description").len(), 1);
        assert!(store.search_products("chair").is_empty());
    }

    #[test]
    fn search_orders_by_popularity() {
        let store = Store::new();
        store.add_product(product("p_1", "a", &[]));
        store.add_product(product("p_2", "b", &[]));
        store.add_product(product("p_3", "c", &[]));
        store.write(|t| {
            t.product_mut("p_3").unwrap().promotion_rank = 2;
            t.product_mut("p_2").unwrap().views = 4;
        });
        let ids: Vec<_> = store.search_products("").into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p_3", "p_2", "p_1"]);
    }

    #[test]
    fn remove_product_returns_row() {
        let store = Store::new();
        store.add_product(product("p_1", "a", &[]));
        assert_eq!(store.remove_product("p_1").unwrap().id, "p_1");
        assert!(store.remove_product("p_1").is_none());
        assert_eq!(store.counts().products, 0);
    }
}

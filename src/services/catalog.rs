use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::{AppError, Result};
use crate::models::gen_id;
use crate::models::product::Product;
use crate::store::Store;

/// Fields for a new listing.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub merchant_id: String,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub stock: i64,
    pub allow_bargain: bool,
    pub tags: BTreeSet<String>,
}

impl NewProduct {
    pub fn new(merchant_id: &str, title: &str, price_cents: i64, stock: i64) -> Self {
        NewProduct {
            merchant_id: merchant_id.to_string(),
            title: title.to_string(),
            description: String::new(),
            price_cents,
            stock,
            allow_bargain: true,
            tags: BTreeSet::new(),
        }
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn allow_bargain(mut self, allow: bool) -> Self {
        self.allow_bargain = allow;
        self
    }
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<Store>,
}

impl CatalogService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn create_product(&self, new: NewProduct) -> Result<Product> {
        if new.merchant_id.is_empty() {
            return Err(AppError::invalid_data("merchant_id cannot be empty"));
        }
        if new.title.is_empty() {
            return Err(AppError::invalid_data("product title cannot be empty"));
        }
        if new.price_cents < 0 {
            return Err(AppError::invalid_data("price_cents must be non-negative"));
        }
        if new.stock < 0 {
            return Err(AppError::invalid_data("stock must be non-negative"));
        }

        let product = Product {
            id: gen_id("p_"),
            merchant_id: new.merchant_id,
            title: new.title,
            description: new.description,
            price_cents: new.price_cents,
            stock: new.stock,
            allow_bargain: new.allow_bargain,
            views: 0,
            sold: 0,
            promotion_rank: 0,
            tags: new.tags,
            created_at: Utc::now(),
        };

        self.store.add_product(product.clone());
        info!(product_id = %product.id, merchant_id = %product.merchant_id, "product created");
        Ok(product)
    }

    /// Apply `delta` to stock. No floor here; the caller may drive it negative.
    pub fn update_stock(&self, product_id: &str, delta: i64) -> Result<Product> {
        self.store.write(|t| -> Result<Product> {
            let p = t
                .product_mut(product_id)
                .ok_or_else(|| AppError::not_found("product", product_id))?;
            p.stock = p
                .stock
                .checked_add(delta)
                .ok_or_else(|| AppError::invalid_data("stock overflows"))?;
            Ok(p.clone())
        })
    }

    pub fn set_promotion_rank(&self, product_id: &str, rank: i64) -> Result<Product> {
        self.store.write(|t| -> Result<Product> {
            let p = t
                .product_mut(product_id)
                .ok_or_else(|| AppError::not_found("product", product_id))?;
            p.promotion_rank = rank;
            Ok(p.clone())
        })
    }

    pub fn search(&self, keyword: &str) -> Vec<Product> {
        self.store.search_products(keyword)
    }

    pub fn get_product(&self, product_id: &str) -> Option<Product> {
        self.store.get_product(product_id)
    }

    pub fn list_for_merchant(&self, merchant_id: &str) -> Vec<Product> {
        self.store.read(|t| {
            t.products
                .iter()
                .filter(|p| p.merchant_id == merchant_id)
                .cloned()
                .collect()
        })
    }

    pub fn delete_product(&self, product_id: &str) -> Result<Product> {
        let removed = self
            .store
            .remove_product(product_id)
            .ok_or_else(|| AppError::not_found("product", product_id))?;
        info!(product_id, "product deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MERCHANT_ID: &str = "m_test";

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(Store::new()))
    }

    #[test]
    fn creates_product() {
        let svc = service();
        let p = svc
            .create_product(NewProduct::new(MERCHANT_ID, "apple", 10, 0).description("apple"))
            .unwrap();
        assert_eq!(p.title, "apple");
        assert!(p.allow_bargain);
        assert_eq!(svc.get_product(&p.id).unwrap(), p);
    }

    #[test]
    fn rejects_bad_input() {
        let svc = service();
        for bad in [
            NewProduct::new("", "apple", 10, 0),
            NewProduct::new(MERCHANT_ID, "", 10, 0),
            NewProduct::new(MERCHANT_ID, "apple", -1, 0),
            NewProduct::new(MERCHANT_ID, "apple", 10, -1),
        ] {
            assert!(matches!(svc.create_product(bad), Err(AppError::Validation(_))));
        }
        assert!(svc.search("").is_empty());
    }

    #[test]
    fn duplicate_titles_are_allowed() {
        let svc = service();
        svc.create_product(NewProduct::new(MERCHANT_ID, "a", 1, 0)).unwrap();
        svc.create_product(NewProduct::new(MERCHANT_ID, "a", 2, 0)).unwrap();
        assert_eq!(svc.list_for_merchant(MERCHANT_ID).len(), 2);
    }

    #[test]
    fn update_stock_has_no_floor() {
        let svc = service();
        let p = svc.create_product(NewProduct::new(MERCHANT_ID, "a", 1, 2)).unwrap();
        assert_eq!(svc.update_stock(&p.id, 3).unwrap().stock, 5);
        assert_eq!(svc.update_stock(&p.id, -8).unwrap().stock, -3);
        assert!(matches!(svc.update_stock("p_missing", 1), Err(AppError::NotFound(_))));
    }

    #[test]
    fn update_stock_rejects_overflow_and_keeps_value() {
        let svc = service();
        let p = svc.create_product(NewProduct::new(MERCHANT_ID, "a", 1, 1)).unwrap();
        assert!(matches!(svc.update_stock(&p.id, i64::MAX), Err(AppError::Validation(_))));
        assert_eq!(svc.get_product(&p.id).unwrap().stock, 1);

        svc.update_stock(&p.id, -1).unwrap();
        svc.update_stock(&p.id, i64::MIN).unwrap();
        assert!(matches!(svc.update_stock(&p.id, -1), Err(AppError::Validation(_))));
        assert_eq!(svc.get_product(&p.id).unwrap().stock, i64::MIN);
    }

    #[test]
    fn delete_product_then_lookup_misses() {
        let svc = service();
        let p = svc.create_product(NewProduct::new(MERCHANT_ID, "apple", 10, 0)).unwrap();
        svc.delete_product(&p.id).unwrap();
        assert!(svc.get_product(&p.id).is_none());
        assert!(matches!(svc.delete_product(&p.id), Err(AppError::NotFound(_))));
    }

    #[test]
    fn promotion_rank_moves_product_up() {
        let svc = service();
        let a = svc.create_product(NewProduct::new(MERCHANT_ID, "a", 1, 0)).unwrap();
        let b = svc.create_product(NewProduct::new(MERCHANT_ID, "b", 1, 0)).unwrap();
        svc.set_promotion_rank(&b.id, 3).unwrap();
        let ids: Vec<_> = svc.search("").into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
    }
}

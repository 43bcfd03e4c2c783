use std::sync::Arc;

use serde::Serialize;

use crate::errors::{AppError, Result};
use crate::store::{Store, StoreCounts};

const TOP_SELLERS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopSeller {
    pub product_id: String,
    pub title: String,
    pub sold: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesReport {
    pub total_sales_cents: i64,
    pub top: Vec<TopSeller>,
}

/// Read-only counters and reports for administrators.
#[derive(Clone)]
pub struct AdminService {
    store: Arc<Store>,
}

impl AdminService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Fails with `Forbidden` unless `user_id` is a registered admin.
    pub fn ensure_admin(&self, user_id: &str) -> Result<()> {
        match self.store.get_user(user_id) {
            Some(u) if u.is_admin() => Ok(()),
            _ => Err(AppError::Forbidden(format!("{} is not an admin", user_id))),
        }
    }

    pub fn counts(&self) -> StoreCounts {
        self.store.counts()
    }

    /// Total sales is sold x current price summed over products, saturating
    /// at `i64::MAX`.
    pub fn sales_report(&self) -> SalesReport {
        let mut products = self.store.all_products();
        let total_sales_cents = products
            .iter()
            .map(|p| {
                i64::try_from(p.sold)
                    .ok()
                    .and_then(|sold| sold.checked_mul(p.price_cents))
                    .unwrap_or(i64::MAX)
            })
            .fold(0i64, i64::saturating_add);

        products.sort_by(|a, b| b.sold.cmp(&a.sold));
        let top = products
            .into_iter()
            .take(TOP_SELLERS)
            .map(|p| TopSeller {
                product_id: p.id,
                title: p.title,
                sold: p.sold,
            })
            .collect();

        SalesReport {
            total_sales_cents,
            top,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::AuthService;
    use crate::services::catalog::{CatalogService, NewProduct};

    #[test]
    fn only_admins_pass() {
        let store = Arc::new(Store::new());
        let auth = AuthService::new(store.clone());
        let admin = auth.register("000000", "admin123", "admin").unwrap();
        let buyer = auth.register("1", "pwd", "buyer").unwrap();
        let svc = AdminService::new(store);

        assert!(svc.ensure_admin(&admin.id).is_ok());
        assert!(matches!(svc.ensure_admin(&buyer.id), Err(AppError::Forbidden(_))));
        assert!(matches!(svc.ensure_admin("ghost"), Err(AppError::Forbidden(_))));
    }

    #[test]
    fn sales_report_totals_and_ranks() {
        let store = Arc::new(Store::new());
        let catalog = CatalogService::new(store.clone());
        for (i, title) in ["a", "b", "c", "d", "e", "f"].iter().enumerate() {
            let p = catalog.create_product(NewProduct::new("m_1", title, 100, 10)).unwrap();
            store.write(|t| t.product_mut(&p.id).unwrap().sold = i as u64);
        }

        let report = AdminService::new(store).sales_report();
        assert_eq!(report.total_sales_cents, (0 + 1 + 2 + 3 + 4 + 5) * 100);
        let titles: Vec<_> = report.top.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn sales_total_saturates_instead_of_overflowing() {
        let store = Arc::new(Store::new());
        let catalog = CatalogService::new(store.clone());
        let pricey = catalog
            .create_product(NewProduct::new("m_1", "pricey", i64::MAX, 10))
            .unwrap();
        let cheap = catalog.create_product(NewProduct::new("m_1", "cheap", 1, 10)).unwrap();
        store.write(|t| {
            t.product_mut(&pricey.id).unwrap().sold = 2;
            t.product_mut(&cheap.id).unwrap().sold = u64::MAX;
        });

        let report = AdminService::new(store).sales_report();
        assert_eq!(report.total_sales_cents, i64::MAX);
        assert_eq!(report.top[0].title, "cheap");
    }
}

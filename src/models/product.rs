use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A listing. Money is always integer minor units (cents).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub merchant_id: String,
    pub title: String,
    pub description: String,
    pub price_cents: i64,
    pub stock: i64,
    pub allow_bargain: bool,
    pub views: u64,
    pub sold: u64,
    pub promotion_rank: i64,
    pub tags: BTreeSet<String>,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Case-insensitive substring match against title, description or any tag.
    /// `needle` must already be lowercased.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(needle))
    }
}

/// Default listing order: promotion rank, views, sold, all descending.
/// `sort_by` is stable, so equal keys keep insertion order.
pub fn sort_by_popularity(products: &mut [Product]) {
    products.sort_by(|a, b| {
        b.promotion_rank
            .cmp(&a.promotion_rank)
            .then(b.views.cmp(&a.views))
            .then(b.sold.cmp(&a.sold))
    });
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, message = "merchant_id cannot be empty"))]
    pub merchant_id: String,
    #[validate(length(min = 1, message = "title cannot be empty"))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_cents: i64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default = "default_allow_bargain")]
    pub allow_bargain: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

fn default_allow_bargain() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStockRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize)]
pub struct PromotionRequest {
    pub rank: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(title: &str, rank: i64, views: u64, sold: u64) -> Product {
        Product {
            id: title.to_string(),
            merchant_id: "m_1".into(),
            title: title.to_string(),
            description: String::new(),
            price_cents: 100,
            stock: 1,
            allow_bargain: true,
            views,
            sold,
            promotion_rank: rank,
            tags: BTreeSet::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn popularity_orders_by_rank_then_views_then_sold() {
        let mut items = vec![
            product("a", 0, 5, 0),
            product("b", 1, 0, 0),
            product("c", 0, 5, 3),
            product("d", 0, 9, 0),
        ];
        sort_by_popularity(&mut items);
        let titles: Vec<_> = items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn popularity_ties_keep_insertion_order() {
        let mut items = vec![product("x", 0, 0, 0), product("y", 0, 0, 0), product("z", 0, 0, 0)];
        sort_by_popularity(&mut items);
        let titles: Vec<_> = items.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["x", "y", "z"]);
    }

    #[test]
    fn matches_tags_case_insensitively() {
        let mut p = product("Lamp", 0, 0, 0);
        p.tags.insert("Vintage".into());
        assert!(p.matches("vint"));
        assert!(p.matches("lam"));
        assert!(!p.matches("phone"));
    }
}

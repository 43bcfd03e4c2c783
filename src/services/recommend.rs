use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::product::{self, Product};
use crate::store::Store;

/// How many trailing history entries feed the tag profile.
const HISTORY_WINDOW: usize = 10;
pub const DEFAULT_TOP_K: usize = 6;

/// Per-user view/purchase history and tag-overlap ranking.
///
/// The history map lives here rather than in the store. It is locked only for
/// the duration of a push or a snapshot and never while the store lock is held.
pub struct RecommendationEngine {
    store: Arc<Store>,
    history: Mutex<HashMap<String, Vec<String>>>,
}

impl RecommendationEngine {
    pub fn new(store: Arc<Store>) -> Self {
        Self {
            store,
            history: Mutex::new(HashMap::new()),
        }
    }

    pub fn record_view(&self, user_id: &str, product_id: &str) {
        self.append_history(user_id, product_id);
        self.store.write(|t| {
            if let Some(p) = t.product_mut(product_id) {
                p.views += 1;
            }
        });
    }

    pub fn record_purchase(&self, user_id: &str, product_id: &str) {
        self.append_history(user_id, product_id);
        self.store.write(|t| {
            if let Some(p) = t.product_mut(product_id) {
                p.sold += 1;
            }
        });
    }

    /// History-only append used by payment, which already moved `sold`
    /// by the purchased quantity.
    pub(crate) fn append_history(&self, user_id: &str, product_id: &str) {
        self.history
            .lock()
            .entry(user_id.to_string())
            .or_default()
            .push(product_id.to_string());
    }

    pub fn history_for(&self, user_id: &str) -> Vec<String> {
        self.history.lock().get(user_id).cloned().unwrap_or_default()
    }

    /// Top `top_k` products for `user_id`.
    ///
    /// Without history this is the popularity order. Otherwise the tags of the
    /// last ten history entries are tallied and each product scores
    /// `5*overlap + 2*promotion_rank + 0.01*views + 0.1*sold`.
    pub fn recommend_for_user(&self, user_id: &str, top_k: usize) -> Vec<Product> {
        let history = self.history_for(user_id);
        let mut products = self.store.all_products();

        if history.is_empty() {
            product::sort_by_popularity(&mut products);
            products.truncate(top_k);
            return products;
        }

        let start = history.len().saturating_sub(HISTORY_WINDOW);
        let mut tag_counts: HashMap<&str, u64> = HashMap::new();
        for pid in &history[start..] {
            if let Some(p) = products.iter().find(|p| &p.id == pid) {
                for tag in &p.tags {
                    *tag_counts.entry(tag.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut scored: Vec<(f64, usize)> = products
            .iter()
            .enumerate()
            .map(|(idx, p)| {
                let overlap: u64 = p
                    .tags
                    .iter()
                    .map(|t| tag_counts.get(t.as_str()).copied().unwrap_or(0))
                    .sum();
                (score(overlap, p), idx)
            })
            .collect();
        // Stable sort keeps insertion order for equal scores.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));

        let order: Vec<usize> = scored.into_iter().take(top_k).map(|(_, idx)| idx).collect();
        order.into_iter().map(|idx| products[idx].clone()).collect()
    }
}

fn score(tag_overlap: u64, p: &Product) -> f64 {
    tag_overlap as f64 * 5.0
        + p.promotion_rank as f64 * 2.0
        + p.views as f64 * 0.01
        + p.sold as f64 * 0.1
}

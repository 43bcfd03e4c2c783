use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::errors::{AppError, Result};
use crate::models::gen_id;
use crate::models::review::Review;
use crate::store::Store;

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<Store>,
}

impl ReviewService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn add_review(&self, product_id: &str, user_id: &str, rating: i64, comment: &str) -> Result<Review> {
        if !(1..=5).contains(&rating) {
            return Err(AppError::invalid_data("rating must be 1..5"));
        }
        if self.store.get_product(product_id).is_none() {
            return Err(AppError::not_found("product", product_id));
        }

        let review = Review {
            id: gen_id("r_"),
            product_id: product_id.to_string(),
            user_id: user_id.to_string(),
            rating: rating as u8,
            comment: comment.to_string(),
            created_at: Utc::now(),
        };
        self.store.add_review(review.clone());
        info!(review_id = %review.id, product_id, rating, "review added");
        Ok(review)
    }

    pub fn reviews_for_product(&self, product_id: &str) -> Vec<Review> {
        self.store.reviews_for_product(product_id)
    }
}

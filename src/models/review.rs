use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_id: String,
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateReviewRequest {
    #[validate(length(min = 1, message = "product_id cannot be empty"))]
    pub product_id: String,
    #[validate(length(min = 1, message = "user_id cannot be empty"))]
    pub user_id: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: String,
}

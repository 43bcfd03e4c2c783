use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A price-cut session on one product. `current_price_cents` only goes down
/// and never below zero. `expires_at` is recorded but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bargain {
    pub id: String,
    pub product_id: String,
    pub requester_id: String,
    pub original_price_cents: i64,
    pub current_price_cents: i64,
    pub participants: BTreeSet<String>,
    pub expires_at: DateTime<Utc>,
    pub closed: bool,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StartBargainRequest {
    #[validate(length(min = 1, message = "requester_id cannot be empty"))]
    pub requester_id: String,
    #[validate(length(min = 1, message = "product_id cannot be empty"))]
    pub product_id: String,
    #[serde(default)]
    pub expiry_minutes: Option<i64>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct JoinBargainRequest {
    #[validate(length(min = 1, message = "user_id cannot be empty"))]
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct JoinBargainResponse {
    pub cut_cents: i64,
    pub bargain: Bargain,
}

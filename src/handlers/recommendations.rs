use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::models::product::Product;
use crate::services::recommend::DEFAULT_TOP_K;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendQuery {
    pub top_k: Option<usize>,
}

pub async fn recommend_for_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<RecommendQuery>,
) -> Json<Vec<Product>> {
    let top_k = query.top_k.unwrap_or(DEFAULT_TOP_K);
    Json(state.recommend.recommend_for_user(&user_id, top_k))
}

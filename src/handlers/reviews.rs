use axum::{extract::State, http::StatusCode, response::Json};
use validator::Validate;

use crate::errors::Result;
use crate::models::review::{CreateReviewRequest, Review};
use crate::state::AppState;

pub async fn create_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> Result<(StatusCode, Json<Review>)> {
    payload.validate()?;

    let review = state.reviews.add_review(
        &payload.product_id,
        &payload.user_id,
        payload.rating,
        &payload.comment,
    )?;
    Ok((StatusCode::CREATED, Json(review)))
}

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::bargain::{Bargain, JoinBargainRequest, JoinBargainResponse, StartBargainRequest};
use crate::state::AppState;

pub async fn start_bargain(
    State(state): State<AppState>,
    Json(payload): Json<StartBargainRequest>,
) -> Result<(StatusCode, Json<Bargain>)> {
    payload.validate()?;

    let expiry = payload
        .expiry_minutes
        .unwrap_or(state.config.bargain_expiry_minutes);
    let bargain = state
        .bargains
        .start(&payload.requester_id, &payload.product_id, expiry)?;
    Ok((StatusCode::CREATED, Json(bargain)))
}

pub async fn get_bargain(
    State(state): State<AppState>,
    Path(bargain_id): Path<String>,
) -> Result<Json<Bargain>> {
    state
        .bargains
        .get_bargain(&bargain_id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("bargain", &bargain_id))
}

pub async fn join_bargain(
    State(state): State<AppState>,
    Path(bargain_id): Path<String>,
    Json(payload): Json<JoinBargainRequest>,
) -> Result<Json<JoinBargainResponse>> {
    payload.validate()?;

    let outcome = state.bargains.join(&bargain_id, &payload.user_id)?;
    Ok(Json(JoinBargainResponse {
        cut_cents: outcome.cut_cents,
        bargain: outcome.bargain,
    }))
}

pub async fn close_bargain(
    State(state): State<AppState>,
    Path(bargain_id): Path<String>,
) -> Result<Json<Bargain>> {
    Ok(Json(state.bargains.close(&bargain_id)?))
}

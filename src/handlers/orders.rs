use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::order::{CreateOrderRequest, Order, PayOrderRequest};
use crate::models::payment::Payment;
use crate::state::AppState;

pub async fn create_order(
    State(state): State<AppState>,
    Json(payload): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<Order>)> {
    payload.validate()?;

    let items: Vec<(String, i64)> = payload
        .items
        .into_iter()
        .map(|item| (item.product_id, item.quantity))
        .collect();
    let order = state.orders.create_order(&payload.buyer_id, &items)?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<Json<Order>> {
    state
        .orders
        .get_order(&order_id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("order", &order_id))
}

/// Resolves to a payment in either outcome; a failed payment is a 200 with
/// `status: "failed"`, not an error.
pub async fn pay_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(payload): Json<PayOrderRequest>,
) -> Result<Json<Payment>> {
    let probability = payload
        .success_probability
        .unwrap_or(state.config.payment_success_rate);
    Ok(Json(state.orders.pay_order(&order_id, probability)?))
}

pub async fn get_buyer_orders(
    State(state): State<AppState>,
    Path(buyer_id): Path<String>,
) -> Json<Vec<Order>> {
    Json(state.orders.orders_for_buyer(&buyer_id))
}

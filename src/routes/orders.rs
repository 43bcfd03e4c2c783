use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::orders::*, state::AppState};

pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/:id", get(get_order))
        .route("/:id/pay", post(pay_order))
        .route("/buyer/:buyer_id", get(get_buyer_orders))
}

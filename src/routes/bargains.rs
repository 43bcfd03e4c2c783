use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::bargains::*, state::AppState};

pub fn bargain_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(start_bargain))
        .route("/:id", get(get_bargain))
        .route("/:id/join", post(join_bargain))
        .route("/:id/close", post(close_bargain))
}

use axum::{routing::get, Router};

use crate::state::AppState;

pub fn recommendation_routes() -> Router<AppState> {
    Router::new().route(
        "/:user_id",
        get(crate::handlers::recommendations::recommend_for_user),
    )
}

pub fn notification_routes() -> Router<AppState> {
    Router::new().route(
        "/:user_id",
        get(crate::handlers::notification_handler::get_user_notifications),
    )
}

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(crate::handlers::auth::register))
        .route("/login", post(crate::handlers::auth::login_with_phone))
}

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/:id", get(crate::handlers::auth::get_user_profile))
        .route("/:id/products", get(crate::handlers::products::merchant_products))
}

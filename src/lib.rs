//! Marketplace demo service: identity, catalog, orders with simulated
//! payment, bargaining, recommendations and a notification log, all over one
//! in-process store.

use axum::{http::Method, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use config::AppConfig;
pub use errors::{AppError, Result};
pub use state::AppState;

pub fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .allow_credentials(false);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .nest("/api/auth", routes::auth::routes())
        .nest("/api/users", routes::auth::user_routes())
        .nest("/api/products", routes::products::product_routes())
        .nest("/api/reviews", routes::products::review_routes())
        .nest("/api/orders", routes::orders::order_routes())
        .nest("/api/bargains", routes::bargains::bargain_routes())
        .nest("/api/recommendations", routes::feeds::recommendation_routes())
        .nest("/api/notifications", routes::feeds::notification_routes())
        .nest("/api/admin", routes::admin::admin_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn root_handler() -> &'static str {
    "SweetFish marketplace API"
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

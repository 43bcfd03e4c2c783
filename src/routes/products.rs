use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers::products::*, state::AppState};

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(search_products).post(create_product))
        .route("/:id", get(get_product).delete(delete_product))
        .route("/:id/stock", post(update_stock))
        .route("/:id/promotion", post(set_promotion))
        .route("/:id/reviews", get(product_reviews))
}

pub fn review_routes() -> Router<AppState> {
    Router::new().route("/", post(crate::handlers::reviews::create_review))
}

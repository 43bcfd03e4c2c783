use axum::{routing::get, Router};

use crate::{handlers::admin::*, state::AppState};

pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(get_stats))
        .route("/sales", get(get_sales_report))
        .route("/users", get(list_users))
}

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::errors::Result;
use crate::models::user::UserResponse;
use crate::services::admin::SalesReport;
use crate::store::StoreCounts;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AdminQuery {
    pub admin_id: String,
}

pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<StoreCounts>> {
    state.admin.ensure_admin(&query.admin_id)?;
    Ok(Json(state.admin.counts()))
}

pub async fn get_sales_report(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<SalesReport>> {
    state.admin.ensure_admin(&query.admin_id)?;
    Ok(Json(state.admin.sales_report()))
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<AdminQuery>,
) -> Result<Json<Vec<UserResponse>>> {
    state.admin.ensure_admin(&query.admin_id)?;
    let users = state
        .auth
        .list_users()
        .iter()
        .map(|u| UserResponse::new(u, state.credit.score(&u.id)))
        .collect();
    Ok(Json(users))
}

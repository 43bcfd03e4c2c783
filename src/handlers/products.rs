use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::product::{
    CreateProductRequest, Product, PromotionRequest, SearchQuery, UpdateStockRequest,
};
use crate::models::review::Review;
use crate::services::catalog::NewProduct;
use crate::state::AppState;

pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>)> {
    payload.validate()?;

    let new = NewProduct {
        merchant_id: payload.merchant_id,
        title: payload.title,
        description: payload.description,
        price_cents: payload.price_cents,
        stock: payload.stock,
        allow_bargain: payload.allow_bargain,
        tags: payload.tags,
    };
    let product = state.catalog.create_product(new)?;
    Ok((StatusCode::CREATED, Json(product)))
}

// Empty `q` lists everything in popularity order.
pub async fn search_products(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Product>> {
    Json(state.catalog.search(&query.q))
}

pub async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<Product>> {
    state
        .catalog
        .get_product(&product_id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("product", &product_id))
}

pub async fn delete_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<StatusCode> {
    state.catalog.delete_product(&product_id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_stock(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(payload): Json<UpdateStockRequest>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog.update_stock(&product_id, payload.delta)?))
}

pub async fn set_promotion(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(payload): Json<PromotionRequest>,
) -> Result<Json<Product>> {
    Ok(Json(state.catalog.set_promotion_rank(&product_id, payload.rank)?))
}

pub async fn product_reviews(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Json<Vec<Review>> {
    Json(state.reviews.reviews_for_product(&product_id))
}

pub async fn merchant_products(
    State(state): State<AppState>,
    Path(merchant_id): Path<String>,
) -> Json<Vec<Product>> {
    Json(state.catalog.list_for_merchant(&merchant_id))
}

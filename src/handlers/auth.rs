use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use validator::Validate;

use crate::errors::{AppError, Result};
use crate::models::user::{CreateUser, LoginWithPhone, UserResponse};
use crate::services::auth::Registration;
use crate::state::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    payload.validate()?;

    let role = payload.role.as_deref().unwrap_or("buyer");
    let extra = Registration {
        name: payload.name,
        shop_name: payload.shop_name,
    };
    let user = state
        .auth
        .register_with(&payload.phone, &payload.password, role, extra)?;

    let credit = state.credit.score(&user.id);
    Ok((StatusCode::CREATED, Json(UserResponse::new(&user, credit))))
}

pub async fn login_with_phone(
    State(state): State<AppState>,
    Json(payload): Json<LoginWithPhone>,
) -> Result<Json<UserResponse>> {
    let user = state
        .auth
        .authenticate(&payload.phone, &payload.password)
        .ok_or(AppError::AuthError)?;

    let credit = state.credit.score(&user.id);
    Ok(Json(UserResponse::new(&user, credit)))
}

pub async fn get_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<UserResponse>> {
    let user = state
        .auth
        .get_user(&user_id)
        .ok_or_else(|| AppError::not_found("user", &user_id))?;

    let credit = state.credit.score(&user.id);
    Ok(Json(UserResponse::new(&user, credit)))
}

// src/handlers/notification_handler.rs

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::{models::notification::NotificationResponse, state::AppState};

// Get user's notifications, oldest first
pub async fn get_user_notifications(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<NotificationResponse>> {
    let notifications = state
        .notifications
        .for_user(&user_id)
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Json(notifications)
}

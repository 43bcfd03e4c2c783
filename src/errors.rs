// src/errors.rs
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Phone already registered: {0}")]
    DuplicatePhone(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock for {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: String,
        requested: i64,
        available: i64,
    },

    #[error("All items must come from the same merchant")]
    MixedMerchant,

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Product does not allow bargaining: {0}")]
    NotBargainable(String),

    #[error("Bargain is closed: {0}")]
    Closed(String),

    #[error("Authentication error")]
    AuthError,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicatePhone(_)
            | AppError::InsufficientStock { .. }
            | AppError::MixedMerchant
            | AppError::InvalidState(_)
            | AppError::NotBargainable(_)
            | AppError::Closed(_) => StatusCode::CONFLICT,
            AppError::AuthError => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::ConfigurationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::DuplicatePhone(_) => "duplicate_phone",
            AppError::NotFound(_) => "not_found",
            AppError::InsufficientStock { .. } => "insufficient_stock",
            AppError::MixedMerchant => "mixed_merchant",
            AppError::InvalidState(_) => "invalid_state",
            AppError::NotBargainable(_) => "not_bargainable",
            AppError::Closed(_) => "closed",
            AppError::AuthError => "auth_error",
            AppError::Forbidden(_) => "forbidden",
            AppError::ConfigurationError(_) => "configuration_error",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
            "success": false,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(err: std::num::ParseFloatError) -> Self {
        AppError::ConfigurationError(format!("Number parsing error: {}", err))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::ConfigurationError(format!("Integer parsing error: {}", err))
    }
}

// Helper conversion functions
impl AppError {
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(kind: &str, id: &str) -> Self {
        AppError::NotFound(format!("{} {}", kind, id))
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        AppError::ConfigurationError(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_domain_errors_to_status_codes() {
        assert_eq!(AppError::invalid_data("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::not_found("order", "o_1").status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::MixedMerchant.status(), StatusCode::CONFLICT);
        assert_eq!(AppError::AuthError.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden("admin only".into()).status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn not_found_message_names_the_entity() {
        let err = AppError::not_found("product", "p_abc");
        assert_eq!(err.to_string(), "Not found: product p_abc");
    }
}

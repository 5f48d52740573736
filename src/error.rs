//! Error handling for the application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Resource not found")]
    NotFound,

    #[error("{0}")]
    NotEligible(String),

    #[error("{0}")]
    InvalidTransition(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Stable machine-readable discriminant for API clients.
    ///
    /// `conflict` is deliberately distinct from `invalid_transition` so that
    /// callers can treat duplicate invoice generation as a benign outcome.
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound => "not_found",
            AppError::NotEligible(_) => "not_eligible",
            AppError::InvalidTransition(_) => "invalid_transition",
            AppError::Conflict(_) => "conflict",
            AppError::Database(_) => "database",
            AppError::Internal(_) => "internal",
        }
    }
}

/// JSON error body returned on every failure path
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error_type: &'static str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            AppError::NotEligible(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::InvalidTransition(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error".to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };

        let body = ErrorResponse {
            error_type: self.error_type(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_distinguishable_from_invalid_transition() {
        let conflict = AppError::Conflict("invoice already exists".to_string());
        let transition = AppError::InvalidTransition("already paid".to_string());
        assert_eq!(conflict.error_type(), "conflict");
        assert_eq!(transition.error_type(), "invalid_transition");
        assert_ne!(conflict.error_type(), transition.error_type());
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::Validation("square_meters must be positive".to_string());
        assert_eq!(err.to_string(), "square_meters must be positive");

        let err = AppError::NotFound;
        assert_eq!(err.to_string(), "Resource not found");
    }
}

//! Unified error handling
//!
//! Application-level error type and its HTTP mapping:
//!
//! | Variant | HTTP | `error` kind |
//! |---------|------|--------------|
//! | Validation | 400 | VALIDATION_ERROR |
//! | InvalidState | 400 | INVALID_STATE |
//! | Unauthorized | 401 | UNAUTHORIZED |
//! | TokenExpired | 401 | TOKEN_EXPIRED |
//! | InvalidToken | 401 | INVALID_TOKEN |
//! | Forbidden | 403 | FORBIDDEN |
//! | NotFound | 404 | NOT_FOUND |
//! | Database | 500 | DATABASE_ERROR |
//! | Internal | 500 | INTERNAL_ERROR |
//!
//! Every handler error is converted into the JSON envelope here; nothing
//! escapes as a bare 500 and nothing crashes the process.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shared::ApiResponse;
use tracing::error;

use crate::db::repository::RepoError;

/// Application error enum
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== Authentication errors (401) ==========
    #[error("Authentication required")]
    Unauthorized,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    // ========== Authorization errors (403) ==========
    #[error("Permission denied: {0}")]
    Forbidden(String),

    // ========== Business errors (4xx) ==========
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Operation not legal in the entity's current state
    /// (cancel past `received`, add an unavailable item, checkout an
    /// empty cart, ...)
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ========== System errors (5xx) ==========
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// Unified message for failed logins, to prevent account enumeration
    pub fn invalid_credentials() -> Self {
        Self::Validation("Invalid email or password".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Please login first".to_string(),
            ),
            AppError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "TOKEN_EXPIRED",
                "Token expired".to_string(),
            ),
            AppError::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid token".to_string(),
            ),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::InvalidState(msg) => (StatusCode::BAD_REQUEST, "INVALID_STATE", msg.clone()),
            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    internal_message("Database error", msg),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    internal_message("Internal server error", msg),
                )
            }
        };

        let body = Json(ApiResponse::<()>::error(kind, message));
        (status, body).into_response()
    }
}

/// 5xx responses expose details only in debug builds; release builds get
/// the generic message and the detail stays in the logs.
fn internal_message(generic: &str, detail: &str) -> String {
    if cfg!(debug_assertions) {
        format!("{generic}: {detail}")
    } else {
        generic.to_string()
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Validation(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for handlers and services
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_error_mapping() {
        let e: AppError = RepoError::NotFound("order x".into()).into();
        assert!(matches!(e, AppError::NotFound(_)));

        let e: AppError = RepoError::Duplicate("email".into()).into();
        assert!(matches!(e, AppError::Validation(_)));
    }
}

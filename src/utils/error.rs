//! Error handling for the console
//!
//! This module defines all error types used throughout the service.

use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

/// Result type alias for the console
pub type Result<T> = std::result::Result<T, ConsoleError>;

/// Main error type for the console
#[derive(Error, Debug)]
pub enum ConsoleError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Standard error response format
#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(serde::Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub timestamp: i64,
}

impl ResponseError for ConsoleError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;

        match self {
            ConsoleError::Validation(_) => StatusCode::BAD_REQUEST,
            ConsoleError::Auth(_) => StatusCode::UNAUTHORIZED,
            ConsoleError::NotFound(_) => StatusCode::NOT_FOUND,
            ConsoleError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let code = match self {
            ConsoleError::Config(_) => "CONFIG_ERROR",
            ConsoleError::Validation(_) => "VALIDATION_ERROR",
            ConsoleError::Auth(_) => "AUTH_ERROR",
            ConsoleError::NotFound(_) => "NOT_FOUND",
            ConsoleError::Conflict(_) => "CONFLICT",
            ConsoleError::Crypto(_) => "CRYPTO_ERROR",
            _ => "INTERNAL_ERROR",
        };

        // Internal error classes keep their details out of responses.
        let message = match self {
            ConsoleError::Validation(_)
            | ConsoleError::Auth(_)
            | ConsoleError::NotFound(_)
            | ConsoleError::Conflict(_) => self.to_string(),
            _ => "An internal error occurred".to_string(),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        HttpResponse::build(self.status_code()).json(error_response)
    }
}

/// Helper functions for creating specific errors
impl ConsoleError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        Self::NotFound(message.into())
    }

    pub fn conflict<S: Into<String>>(message: S) -> Self {
        Self::Conflict(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ConsoleError::validation("bad input").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ConsoleError::auth("no session").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ConsoleError::not_found("missing").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ConsoleError::conflict("duplicate").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ConsoleError::internal("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_includes_detail() {
        let err = ConsoleError::conflict("permission 'view_users' already exists");
        assert_eq!(
            err.to_string(),
            "Conflict: permission 'view_users' already exists"
        );
    }

    #[actix_web::test]
    async fn test_internal_detail_not_exposed() {
        let err = ConsoleError::internal("lock poisoned in store");
        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        // The message in the body must be generic; the detail stays in logs.
        let bytes = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(!text.contains("lock poisoned"));
        assert!(text.contains("INTERNAL_ERROR"));
    }

    #[actix_web::test]
    async fn test_validation_detail_exposed() {
        let err = ConsoleError::validation("Passwords do not match");
        let bytes = actix_web::body::to_bytes(err.error_response().into_body())
            .await
            .unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.contains("Passwords do not match"));
        assert!(text.contains("VALIDATION_ERROR"));
    }
}

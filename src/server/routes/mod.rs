//! HTTP route modules
//!
//! Route handlers organized by resource, plus the response envelope shared
//! by all of them.

pub mod auth;
pub mod dashboard;
pub mod health;
pub mod permissions;
pub mod roles;
pub mod users;

use actix_web::web;
use serde::Deserialize;

/// Standard API response structure
#[derive(Debug, Clone, serde::Serialize)]
pub struct ApiResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Response data (if successful)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (if failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T>
where
    T: serde::Serialize,
{
    /// Create a successful response
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

impl<T> ApiResponse<T> {
    /// Create an error response
    pub fn error(message: String) -> ApiResponse<T> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Optional substring filter accepted by list endpoints
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    /// Case-insensitive substring to filter by
    pub q: Option<String>,
}

/// Configure all API routes under `/api`, plus the health endpoint
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check)).service(
        web::scope("/api")
            .configure(auth::configure_routes)
            .configure(users::configure_routes)
            .configure(roles::configure_routes)
            .configure(permissions::configure_routes)
            .configure(dashboard::configure_routes),
    );
}

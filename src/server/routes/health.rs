//! Health check endpoint

use crate::server::state::AppState;
use actix_web::{web, HttpResponse};
use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    users: usize,
    roles: usize,
    permissions: usize,
    active_sessions: usize,
    /// Whether every role-held permission id resolves to a permission entry
    store_consistent: bool,
}

/// Liveness probe with store counters
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let stats = state.store.stats();

    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        users: stats.total_users,
        roles: stats.total_roles,
        permissions: stats.total_permissions,
        active_sessions: state.auth.active_sessions(),
        store_consistent: state.store.dangling_references().is_empty(),
    })
}

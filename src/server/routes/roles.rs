//! Role management endpoints

use crate::core::models::{RoleDefinition, RoleName};
use crate::server::routes::{ApiResponse, SearchQuery};
use crate::server::state::AppState;
use crate::utils::error::ConsoleError;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

/// Configure role routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roles")
            .route("", web::get().to(list_roles))
            .route("", web::post().to(create_role))
            .route("/{name}", web::get().to(get_role))
            .route("/{name}", web::put().to(update_role))
            .route("/{name}", web::delete().to(delete_role)),
    );
}

/// Role creation request
#[derive(Debug, Deserialize)]
struct CreateRoleRequest {
    name: RoleName,
    #[serde(default)]
    permissions: Vec<String>,
}

/// Role update request: the submitted set replaces the stored one
#[derive(Debug, Deserialize)]
struct UpdateRoleRequest {
    permissions: Vec<String>,
}

/// List or filter role definitions
async fn list_roles(state: web::Data<AppState>, query: web::Query<SearchQuery>) -> HttpResponse {
    let roles = match query.q.as_deref() {
        Some(q) if !q.is_empty() => state.store.search_roles(q),
        _ => state.store.list_roles(),
    };

    HttpResponse::Ok().json(ApiResponse::success(roles))
}

/// Create a role definition
async fn create_role(
    state: web::Data<AppState>,
    request: web::Json<CreateRoleRequest>,
) -> Result<HttpResponse, ConsoleError> {
    let request = request.into_inner();

    let role = state
        .store
        .create_role(RoleDefinition::new(request.name, request.permissions))?;

    Ok(HttpResponse::Created().json(ApiResponse::success(role)))
}

/// Fetch a role definition by name
async fn get_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ConsoleError> {
    let name = parse_role_name(&path)?;
    let role = state
        .store
        .get_role(name)
        .ok_or_else(|| ConsoleError::not_found(format!("Role '{}' not found", name)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(role)))
}

/// Replace a role's permission set
async fn update_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdateRoleRequest>,
) -> Result<HttpResponse, ConsoleError> {
    let name = parse_role_name(&path)?;
    let role = state
        .store
        .set_role_permissions(name, &request.permissions)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(role)))
}

/// Delete a role definition
async fn delete_role(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ConsoleError> {
    let name = parse_role_name(&path)?;
    state.store.delete_role(name)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(())))
}

fn parse_role_name(raw: &str) -> Result<RoleName, ConsoleError> {
    raw.parse()
        .map_err(|_| ConsoleError::validation(format!("Invalid role name: {}", raw)))
}

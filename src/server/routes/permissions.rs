//! Permission management endpoints

use crate::core::models::RoleName;
use crate::server::routes::{ApiResponse, SearchQuery};
use crate::server::state::AppState;
use crate::utils::error::ConsoleError;
use crate::utils::validation::DataValidator;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

/// Configure permission routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/permissions")
            .route("", web::get().to(list_permissions))
            .route("", web::post().to(create_permission))
            .route("/{id}", web::get().to(get_permission))
            .route("/{id}", web::put().to(update_permission))
            .route("/{id}", web::delete().to(delete_permission)),
    );
}

/// Permission creation request
#[derive(Debug, Deserialize)]
struct CreatePermissionRequest {
    id: String,
    name: String,
    #[serde(default)]
    roles: Vec<RoleName>,
}

/// Permission update request; the role list is authoritative
#[derive(Debug, Deserialize)]
struct UpdatePermissionRequest {
    name: String,
    #[serde(default)]
    roles: Vec<RoleName>,
}

/// List or filter permissions
async fn list_permissions(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let permissions = match query.q.as_deref() {
        Some(q) if !q.is_empty() => state.store.search_permissions(q),
        _ => state.store.list_permissions(),
    };

    HttpResponse::Ok().json(ApiResponse::success(permissions))
}

/// Create a permission and assign it to roles
async fn create_permission(
    state: web::Data<AppState>,
    request: web::Json<CreatePermissionRequest>,
) -> Result<HttpResponse, ConsoleError> {
    let request = request.into_inner();

    DataValidator::validate_permission_id(&request.id)?;
    DataValidator::validate_permission_name(&request.name)?;

    let permission = state
        .store
        .create_permission(request.id, request.name, &request.roles)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(permission)))
}

/// Fetch a permission by id
async fn get_permission(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ConsoleError> {
    let id = path.into_inner();
    let permission = state
        .store
        .get_permission(&id)
        .ok_or_else(|| ConsoleError::not_found(format!("Permission '{}' not found", id)))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(permission)))
}

/// Update a permission's name and role assignments
async fn update_permission(
    state: web::Data<AppState>,
    path: web::Path<String>,
    request: web::Json<UpdatePermissionRequest>,
) -> Result<HttpResponse, ConsoleError> {
    let request = request.into_inner();

    DataValidator::validate_permission_name(&request.name)?;

    let permission =
        state
            .store
            .update_permission(&path.into_inner(), request.name, &request.roles)?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(permission)))
}

/// Delete a permission, honoring the configured delete policy
async fn delete_permission(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ConsoleError> {
    state.store.delete_permission(&path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(())))
}

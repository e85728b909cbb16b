//! User management endpoints

use crate::core::models::{RoleName, User, UserStatus};
use crate::server::routes::{ApiResponse, SearchQuery};
use crate::server::state::AppState;
use crate::store::UserUpdate;
use crate::utils::crypto::hash_password;
use crate::utils::error::ConsoleError;
use crate::utils::validation::DataValidator;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

/// Configure user routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .route("", web::get().to(list_users))
            .route("", web::post().to(create_user))
            .route("/{id}", web::get().to(get_user))
            .route("/{id}", web::put().to(update_user))
            .route("/{id}", web::delete().to(delete_user)),
    );
}

/// User creation request
#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    name: String,
    email: String,
    password: String,
    role: RoleName,
    status: Option<UserStatus>,
}

/// User update request; omitted fields are left unchanged
#[derive(Debug, Deserialize)]
struct UpdateUserRequest {
    name: Option<String>,
    email: Option<String>,
    role: Option<RoleName>,
    status: Option<UserStatus>,
}

/// List or filter users
async fn list_users(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> HttpResponse {
    let users = match query.q.as_deref() {
        Some(q) if !q.is_empty() => state.store.search_users(q),
        _ => state.store.list_users(),
    };

    HttpResponse::Ok().json(ApiResponse::success(users))
}

/// Create a user
async fn create_user(
    state: web::Data<AppState>,
    request: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, ConsoleError> {
    let request = request.into_inner();

    DataValidator::validate_display_name(&request.name)?;
    DataValidator::validate_email(&request.email)?;
    DataValidator::validate_password(&request.password)?;

    let password_hash = hash_password(&request.password)?;
    let mut user = User::new(request.name, request.email, password_hash, request.role);
    if let Some(status) = request.status {
        user.status = status;
    }

    let user = state.store.create_user(user)?;
    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

/// Fetch a user by id
async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ConsoleError> {
    let user = state
        .store
        .get_user(path.into_inner())
        .ok_or_else(|| ConsoleError::not_found("User not found"))?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Update a user
async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    request: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, ConsoleError> {
    let request = request.into_inner();

    if let Some(name) = &request.name {
        DataValidator::validate_display_name(name)?;
    }
    if let Some(email) = &request.email {
        DataValidator::validate_email(email)?;
    }

    let user = state.store.update_user(
        path.into_inner(),
        UserUpdate {
            name: request.name,
            email: request.email,
            role: request.role,
            status: request.status,
        },
    )?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Delete a user
async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ConsoleError> {
    state.store.delete_user(path.into_inner())?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(())))
}

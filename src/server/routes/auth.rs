//! Authentication endpoints

use crate::core::models::User;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::ConsoleError;
use actix_web::http::header::HeaderMap;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Configure authentication routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/logout", web::post().to(logout))
            .route("/me", web::get().to(get_current_user))
            .route("/change-password", web::post().to(change_password))
            .route("/profile", web::put().to(update_profile)),
    );
}

/// User registration request
#[derive(Debug, Deserialize)]
struct RegisterRequest {
    name: String,
    email: String,
    password: String,
}

/// User login request
#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

/// Password change request
#[derive(Debug, Deserialize)]
struct ChangePasswordRequest {
    current_password: String,
    new_password: String,
    confirm_password: String,
}

/// Profile update request
#[derive(Debug, Deserialize)]
struct ProfileRequest {
    name: String,
    email: String,
}

/// Login response
#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
    expires_at: chrono::DateTime<chrono::Utc>,
    user: User,
}

/// User registration endpoint
async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ConsoleError> {
    info!(email = %request.email, "Registration attempt");

    let request = request.into_inner();
    let user = state
        .auth
        .register(request.name, request.email, request.password)?;

    Ok(HttpResponse::Created().json(ApiResponse::success(user)))
}

/// User login endpoint
async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ConsoleError> {
    info!(email = %request.email, "Login attempt");

    match state.auth.login(&request.email, &request.password) {
        Ok((user, session)) => Ok(HttpResponse::Ok().json(ApiResponse::success(LoginResponse {
            token: session.token,
            expires_at: session.expires_at,
            user,
        }))),
        Err(e) => {
            warn!(email = %request.email, "Login failed");
            Err(e)
        }
    }
}

/// User logout endpoint
async fn logout(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    if let Some(token) = extract_session_token(req.headers()) {
        state.auth.logout(&token);
    }

    HttpResponse::Ok().json(ApiResponse::success(()))
}

/// Get current user endpoint
async fn get_current_user(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ConsoleError> {
    let user = authenticated_user(&state, &req)?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(user)))
}

/// Change password endpoint
async fn change_password(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse, ConsoleError> {
    let user = authenticated_user(&state, &req)?;

    state.auth.change_password(
        user.id(),
        &request.current_password,
        &request.new_password,
        &request.confirm_password,
    )?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(())))
}

/// Profile update endpoint
async fn update_profile(
    state: web::Data<AppState>,
    req: HttpRequest,
    request: web::Json<ProfileRequest>,
) -> Result<HttpResponse, ConsoleError> {
    let user = authenticated_user(&state, &req)?;

    let request = request.into_inner();
    state
        .auth
        .update_profile(user.id(), request.name, request.email)?;

    let updated = state
        .store
        .get_user(user.id())
        .ok_or_else(|| ConsoleError::not_found("User not found"))?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(updated)))
}

/// Resolve the request's session token to its user
fn authenticated_user(state: &AppState, req: &HttpRequest) -> Result<User, ConsoleError> {
    let token = extract_session_token(req.headers())
        .ok_or_else(|| ConsoleError::auth("No session token provided"))?;
    state.auth.current_user(&token)
}

/// Extract session token from headers
fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    // Check Authorization header
    if let Some(auth_header) = headers.get("authorization") {
        if let Ok(auth_str) = auth_header.to_str() {
            if let Some(stripped) = auth_str.strip_prefix("Bearer ") {
                return Some(stripped.to_string());
            }
        }
    }

    // Check session cookie
    if let Some(cookie_header) = headers.get("cookie") {
        if let Ok(cookie_str) = cookie_header.to_str() {
            for cookie in cookie_str.split(';') {
                let cookie = cookie.trim();
                if let Some(stripped) = cookie.strip_prefix("session=") {
                    return Some(stripped.to_string());
                }
            }
        }
    }

    None
}

//! End-to-end API tests driving the actix app

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use rbac_console::auth::AuthSystem;
use rbac_console::config::{Config, DeletePolicy};
use rbac_console::server::{routes, AppState};
use rbac_console::store::EntityStore;
use serde_json::{json, Value};
use std::sync::Arc;

fn app_state(config: Config) -> web::Data<AppState> {
    let store = Arc::new(EntityStore::new(config.store()));
    let auth = AuthSystem::new(config.auth(), Arc::clone(&store));
    web::Data::new(AppState::new(config, store, auth))
}

macro_rules! test_app {
    () => {
        test::init_service(
            App::new()
                .app_data(app_state(Config::default()))
                .configure(routes::configure),
        )
        .await
    };
    ($config:expr) => {
        test::init_service(
            App::new()
                .app_data(app_state($config))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn health_reports_consistent_store() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["roles"], 3);
    assert_eq!(body["permissions"], 6);
    assert_eq!(body["store_consistent"], true);
}

#[actix_web::test]
async fn register_login_me_flow() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "password": "analytical1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["role"], "user");
    assert!(body["data"]["password_hash"].is_null());

    // Login and use the returned token.
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "analytical1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::get()
        .uri("/api/auth/me")
        .insert_header(("Authorization", format!("Bearer {}", token)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "ada@example.com");
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "analytical1"
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "wrong-password"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[actix_web::test]
async fn me_without_token_is_unauthorized() {
    let app = test_app!();

    let req = test::TestRequest::get().uri("/api/auth/me").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn change_password_validation_errors() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/auth/register")
        .set_json(json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "analytical1"
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({"email": "ada@example.com", "password": "analytical1"}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();
    let bearer = format!("Bearer {}", token);

    // Too short.
    let req = test::TestRequest::post()
        .uri("/api/auth/change-password")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({
            "current_password": "analytical1",
            "new_password": "short",
            "confirm_password": "short"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Mismatched confirmation.
    let req = test::TestRequest::post()
        .uri("/api/auth/change-password")
        .insert_header(("Authorization", bearer.clone()))
        .set_json(json!({
            "current_password": "analytical1",
            "new_password": "newpassword",
            "confirm_password": "otherpassword"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Validation error: Passwords do not match");

    // Valid change succeeds.
    let req = test::TestRequest::post()
        .uri("/api/auth/change-password")
        .insert_header(("Authorization", bearer))
        .set_json(json!({
            "current_password": "analytical1",
            "new_password": "newpassword",
            "confirm_password": "newpassword"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn user_crud_and_search() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Grace Hopper",
            "email": "grace@example.com",
            "password": "nanoseconds",
            "role": "moderator"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    let user_id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["status"], "active");

    // Duplicate email conflicts.
    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Grace Again",
            "email": "grace@example.com",
            "password": "nanoseconds",
            "role": "user"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Reassign role and deactivate.
    let req = test::TestRequest::put()
        .uri(&format!("/api/users/{}", user_id))
        .set_json(json!({"role": "admin", "status": "inactive"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["role"], "admin");
    assert_eq!(body["data"]["status"], "inactive");

    // Case-insensitive search over name and email.
    let req = test::TestRequest::get()
        .uri("/api/users?q=HOPPER")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/users?q=nobody")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);

    // Delete, then 404 on fetch.
    let req = test::TestRequest::delete()
        .uri(&format!("/api/users/{}", user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", user_id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn role_edit_replaces_permission_set() {
    let app = test_app!();

    let req = test::TestRequest::put()
        .uri("/api/roles/moderator")
        .set_json(json!({"permissions": ["view_users", "view_users", "manage_users"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let permissions = body["data"]["permissions"].as_array().unwrap();
    // Duplicates collapse; the submitted set is stored exactly.
    assert_eq!(permissions.len(), 2);

    // The permission side reflects the edit.
    let req = test::TestRequest::get()
        .uri("/api/permissions/manage_users")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let roles = body["data"]["roles"].as_array().unwrap();
    assert!(roles.iter().any(|r| r == "moderator"));
}

#[actix_web::test]
async fn role_edit_rejects_unknown_permission() {
    let app = test_app!();

    let req = test::TestRequest::put()
        .uri("/api/roles/user")
        .set_json(json!({"permissions": ["no_such_permission"]}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // The role kept its original set.
    let req = test::TestRequest::get().uri("/api/roles/user").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["permissions"], json!(["view_users"]));
}

#[actix_web::test]
async fn unknown_role_name_is_rejected() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/roles/superuser")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn permission_create_update_delete() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/permissions")
        .set_json(json!({
            "id": "export_reports",
            "name": "Export Reports",
            "roles": ["admin", "moderator"]
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["roles"], json!(["admin", "moderator"]));

    // Duplicate id conflicts.
    let req = test::TestRequest::post()
        .uri("/api/permissions")
        .set_json(json!({"id": "export_reports", "name": "Again", "roles": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Update moves it off moderator.
    let req = test::TestRequest::put()
        .uri("/api/permissions/export_reports")
        .set_json(json!({"name": "Export Reports", "roles": ["admin"]}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["roles"], json!(["admin"]));

    // Restrict policy: delete is a conflict while referenced.
    let req = test::TestRequest::delete()
        .uri("/api/permissions/export_reports")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Unassign everywhere, then delete succeeds.
    let req = test::TestRequest::put()
        .uri("/api/permissions/export_reports")
        .set_json(json!({"name": "Export Reports", "roles": []}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::delete()
        .uri("/api/permissions/export_reports")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri("/api/permissions/export_reports")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn permission_delete_cascades_when_configured() {
    let mut config = Config::default();
    config.console.store.delete_policy = DeletePolicy::Cascade;
    let app = test_app!(config);

    let req = test::TestRequest::delete()
        .uri("/api/permissions/view_users")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Every role lost the reference; the store stays consistent.
    let req = test::TestRequest::get().uri("/api/roles/user").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["permissions"], json!([]));

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["store_consistent"], true);
}

#[actix_web::test]
async fn permission_search_matches_id_and_name() {
    let app = test_app!();

    let req = test::TestRequest::get()
        .uri("/api/permissions?q=VIEW")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);

    let req = test::TestRequest::get()
        .uri("/api/roles?q=mod")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let roles = body["data"].as_array().unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0]["name"], "moderator");
}

#[actix_web::test]
async fn invalid_permission_id_is_rejected() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/permissions")
        .set_json(json!({"id": "has spaces", "name": "Bad", "roles": []}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[actix_web::test]
async fn dashboard_stats_counts_entities() {
    let app = test_app!();

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "name": "Grace",
            "email": "grace@example.com",
            "password": "nanoseconds",
            "role": "user"
        }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get()
        .uri("/api/dashboard/stats")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["data"]["total_users"], 1);
    assert_eq!(body["data"]["active_users"], 1);
    assert_eq!(body["data"]["total_roles"], 3);
    assert_eq!(body["data"]["total_permissions"], 6);
}

//! Dashboard endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{web, HttpResponse};

/// Configure dashboard routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/dashboard").route("/stats", web::get().to(stats)));
}

/// Dashboard counters
async fn stats(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(state.store.stats()))
}

//! Liveness endpoint

use actix_web::web::{get, scope};
use actix_web::{HttpResponse, Scope};
use serde_json::json;

const API_PATH: &str = "/api/health";

pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(health))
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "status": "ok",
    }))
}

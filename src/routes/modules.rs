//! Learning module CRUD endpoints

use actix_web::web::{delete, get, post, put, scope};
use actix_web::{HttpResponse, Scope, web};
use mentora_core::modules::ModuleDraft;
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::state::AppState;

/// The base path for the module repository endpoints
const API_PATH: &str = "/api/modules";

/// Configures and returns the Actix `Scope` for the module routes.
///
/// # Registered Routes:
///
/// *   **`GET /`**: list all modules, newest first.
/// *   **`POST /`**: create a module from a draft; returns 201.
/// *   **`GET /{module_id}`**: fetch one module; 404 when absent.
/// *   **`PUT /{module_id}`**: replace a module's draft-carried fields,
///     preserving id and creation timestamp; 404 when absent.
/// *   **`DELETE /{module_id}`**: remove a module; 204, 404 when absent.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list))
        .route("", post().to(create))
        .route("/{module_id}", get().to(fetch))
        .route("/{module_id}", put().to(update))
        .route("/{module_id}", delete().to(remove))
}

async fn list(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.modules.list().await)
}

async fn create(
    state: web::Data<AppState>,
    payload: web::Json<ModuleDraft>,
) -> Result<HttpResponse, ApiError> {
    let draft = payload.into_inner();
    draft.validate()?;
    let module = state.modules.create(draft).await;
    Ok(HttpResponse::Created().json(module))
}

async fn fetch(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let module = state.modules.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(module))
}

async fn update(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    payload: web::Json<ModuleDraft>,
) -> Result<HttpResponse, ApiError> {
    let draft = payload.into_inner();
    draft.validate()?;
    let module = state.modules.update(path.into_inner(), draft).await?;
    Ok(HttpResponse::Ok().json(module))
}

async fn remove(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    state.modules.delete(path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

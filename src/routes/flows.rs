//! Generation flow endpoints
//!
//! Each route runs one schema-validated flow end to end and returns the
//! typed output as JSON. Failures surface through [`ApiError`] with the
//! uniform error body.

use actix_web::web::{post, scope};
use actix_web::{HttpResponse, Scope, web};
use mentora_core::flows::{
    AdaptLearningPath, AdaptLearningPathInput, GenerateQuizQuestions, GenerateQuizQuestionsInput,
    SummarizeLessonTopic, SummarizeLessonTopicInput,
};

use crate::error::ApiError;
use crate::state::AppState;

/// The base path for the generation flow endpoints
const API_PATH: &str = "/api/flows";

/// Configures and returns the Actix `Scope` for the flow routes.
///
/// # Registered Routes:
///
/// *   **`POST /summarize`**: summarize a lesson topic.
/// *   **`POST /quiz`**: generate quiz questions from lesson content.
/// *   **`POST /adapt`**: adjust difficulty from student performance.
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/summarize", post().to(summarize))
        .route("/quiz", post().to(quiz))
        .route("/adapt", post().to(adapt))
}

async fn summarize(
    state: web::Data<AppState>,
    payload: web::Json<SummarizeLessonTopicInput>,
) -> Result<HttpResponse, ApiError> {
    let output = state
        .engine
        .run(&SummarizeLessonTopic, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(output))
}

async fn quiz(
    state: web::Data<AppState>,
    payload: web::Json<GenerateQuizQuestionsInput>,
) -> Result<HttpResponse, ApiError> {
    let output = state
        .engine
        .run(&GenerateQuizQuestions, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(output))
}

async fn adapt(
    state: web::Data<AppState>,
    payload: web::Json<AdaptLearningPathInput>,
) -> Result<HttpResponse, ApiError> {
    let output = state
        .engine
        .run(&AdaptLearningPath, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(output))
}

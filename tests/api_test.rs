//! HTTP surface tests: routes, status codes, and the uniform error body.

use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, Error, test, web};
use async_trait::async_trait;
use mentora::error::json_error_handler;
use mentora::routes;
use mentora::state::AppState;
use mentora_core::flows::{FlowEngine, GenerationSettings};
use mentora_core::llm::{FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse};
use mentora_core::modules::{InMemoryModuleStore, ModuleStore};
use serde_json::{Value, json};

const LESSON: &str = "Photosynthesis converts light energy into chemical energy stored in \
                      glucose, releasing oxygen along the way.";

/// Provider double serving scripted replies
struct ScriptedProvider {
    replies: Mutex<Vec<Result<String, LLMError>>>,
}

impl ScriptedProvider {
    fn with_reply(reply: Value) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(vec![Ok(reply.to_string())]),
        })
    }

    fn with_error(error: LLMError) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(vec![Err(error)]),
        })
    }

    fn unused() -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, _request: LLMRequest) -> Result<LLMResponse, LLMError> {
        let reply = self.replies.lock().unwrap().remove(0);
        reply.map(|content| LLMResponse {
            content,
            usage: None,
            finish_reason: FinishReason::Stop,
        })
    }

    fn supported_models(&self) -> Vec<String> {
        vec!["scripted-model".to_string()]
    }

    fn validate_request(&self, _request: &LLMRequest) -> Result<(), LLMError> {
        Ok(())
    }
}

fn app_state(provider: Arc<ScriptedProvider>) -> web::Data<AppState> {
    let engine = FlowEngine::new(provider, GenerationSettings::default());
    let modules: Arc<dyn ModuleStore> = Arc::new(InMemoryModuleStore::with_samples());
    web::Data::new(AppState::new(engine, modules))
}

fn build_app(
    state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(
            web::JsonConfig::default()
                .limit(1024 * 1024)
                .error_handler(json_error_handler),
        )
        .app_data(state)
        .service(routes::flows::configure_routes())
        .service(routes::modules::configure_routes())
        .service(routes::health::configure_routes())
}

#[actix_web::test]
async fn summarize_returns_summary_with_the_fixed_progress_note() {
    let provider = ScriptedProvider::with_reply(json!({
        "summary": "Plants convert light into chemical energy."
    }));
    let app = test::init_service(build_app(app_state(provider))).await;

    let req = test::TestRequest::post()
        .uri("/api/flows/summarize")
        .set_json(json!({"topic": "Photosynthesis", "lessonContent": LESSON}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["summary"], "Plants convert light into chemical energy.");
    assert_eq!(
        body["progress"],
        "Generated a concise summary of the lesson topic."
    );
}

#[actix_web::test]
async fn summarize_rejects_invalid_input_with_field_details() {
    let app = test::init_service(build_app(app_state(ScriptedProvider::unused()))).await;

    let req = test::TestRequest::post()
        .uri("/api/flows/summarize")
        .set_json(json!({"topic": "ab", "lessonContent": LESSON}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("validation"));
    assert!(body["details"].get("topic").is_some());
}

#[actix_web::test]
async fn quiz_applies_request_defaults() {
    let provider = ScriptedProvider::with_reply(json!({
        "questions": [
            {"question": "What does chlorophyll absorb?", "answer": "Light.", "difficulty": "medium"},
            {"question": "What gas is released?", "answer": "Oxygen.", "difficulty": "medium"}
        ]
    }));
    let app = test::init_service(build_app(app_state(provider))).await;

    let req = test::TestRequest::post()
        .uri("/api/flows/quiz")
        .set_json(json!({"lessonContent": LESSON}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["questions"].as_array().unwrap().len(), 2);
}

#[actix_web::test]
async fn adapt_passes_the_verdict_through() {
    let provider = ScriptedProvider::with_reply(json!({
        "newDifficulty": "easy",
        "reasoning": "Low accuracy with a hint suggests easing difficulty."
    }));
    let app = test::init_service(build_app(app_state(provider))).await;

    let req = test::TestRequest::post()
        .uri("/api/flows/adapt")
        .set_json(json!({
            "studentId": "student_001",
            "topic": "Introduction to Fractions",
            "performanceData": {
                "exercisesCompleted": 5,
                "correctAnswers": 3,
                "timeSpent": 30,
                "hintUsed": true
            },
            "currentDifficulty": "medium"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["newDifficulty"], "easy");
    assert_eq!(
        body["reasoning"],
        "Low accuracy with a hint suggests easing difficulty."
    );
}

#[actix_web::test]
async fn provider_failures_map_to_bad_gateway() {
    let provider = ScriptedProvider::with_error(LLMError::RateLimit);
    let app = test::init_service(build_app(app_state(provider))).await;

    let req = test::TestRequest::post()
        .uri("/api/flows/summarize")
        .set_json(json!({"topic": "Photosynthesis", "lessonContent": LESSON}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Rate limit exceeded");
}

#[actix_web::test]
async fn malformed_replies_map_to_bad_gateway() {
    let provider = ScriptedProvider::with_reply(json!({"unexpected": "shape"}));
    let app = test::init_service(build_app(app_state(provider))).await;

    let req = test::TestRequest::post()
        .uri("/api/flows/summarize")
        .set_json(json!({"topic": "Photosynthesis", "lessonContent": LESSON}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_web::test]
async fn invalid_json_bodies_return_the_structured_error_shape() {
    let app = test::init_service(build_app(app_state(ScriptedProvider::unused()))).await;

    let req = test::TestRequest::post()
        .uri("/api/flows/summarize")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("invalid request body"));
}

#[actix_web::test]
async fn modules_support_a_full_crud_roundtrip() {
    let app = test::init_service(build_app(app_state(ScriptedProvider::unused()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/modules").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let listed: Value = test::read_body_json(resp).await;
    assert_eq!(listed.as_array().unwrap().len(), 3);
    assert_eq!(listed[0]["title"], "Introduction to Algebra");

    let create = test::TestRequest::post()
        .uri("/api/modules")
        .set_json(json!({
            "title": "Fractions",
            "content": "Numerators, denominators, and equivalence.",
            "exercises": [{"description": "Simplify 4/8.", "type": "text"}]
        }))
        .to_request();
    let resp = test::call_service(&app, create).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    let created_at = created["createdAt"].as_str().unwrap().to_string();
    assert!(!created["exercises"][0]["id"].as_str().unwrap().is_empty());
    assert_eq!(created["teacherId"], "teacher1");

    let update = test::TestRequest::put()
        .uri(&format!("/api/modules/{id}"))
        .set_json(json!({
            "title": "Fractions, Revised",
            "content": "Numerators, denominators, equivalence, and comparison.",
            "isPublic": true
        }))
        .to_request();
    let resp = test::call_service(&app, update).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["title"], "Fractions, Revised");
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["createdAt"], created_at.as_str());

    let resp = test::call_service(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/modules/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/modules/{id}"))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn module_drafts_are_validated_before_storage() {
    let app = test::init_service(build_app(app_state(ScriptedProvider::unused()))).await;

    let req = test::TestRequest::post()
        .uri("/api/modules")
        .set_json(json!({"title": "ab", "content": "tiny"}))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["details"].get("title").is_some());
    assert!(body["details"].get("content").is_some());
}

#[actix_web::test]
async fn unknown_module_ids_return_not_found() {
    let app = test::init_service(build_app(app_state(ScriptedProvider::unused()))).await;

    let req = test::TestRequest::get()
        .uri(&format!("/api/modules/{}", uuid::Uuid::new_v4()))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[actix_web::test]
async fn health_reports_the_service_identity() {
    let app = test::init_service(build_app(app_state(ScriptedProvider::unused()))).await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["service"], "mentora");
    assert_eq!(body["status"], "ok");
}

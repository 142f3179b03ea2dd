//! Uniform JSON error responses
//!
//! Every failure leaving the server carries the same body shape:
//! `{"error": <message>, "details": <optional structured detail>}`. Input
//! validation maps to 400, missing modules to 404, provider and reply
//! failures to 502, and template rendering bugs to 500.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use mentora_core::flows::FlowError;
use mentora_core::modules::StoreError;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Flow(#[from] FlowError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("input validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

impl ApiError {
    fn details(&self) -> Option<Value> {
        match self {
            ApiError::Flow(FlowError::InvalidInput(errors)) | ApiError::Validation(errors) => {
                serde_json::to_value(errors).ok()
            }
            _ => None,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Flow(FlowError::InvalidInput(_)) | ApiError::Validation(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Flow(FlowError::Template(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Flow(FlowError::Provider(_)) | ApiError::Flow(FlowError::InvalidOutput(_)) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.status_code().is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        })
    }
}

/// Keep body-deserialization failures in the same error shape as everything
/// else the server returns.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let body = ErrorResponse {
        error: format!("invalid request body: {err}"),
        details: None,
    };
    InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
}

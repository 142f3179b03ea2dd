//! Universal provider abstraction for hosted text-generation APIs
//!
//! Every flow speaks to its provider through one request/response pair. The
//! request carries a rendered prompt plus an optional JSON Schema describing
//! the reply shape; adapters translate both into each provider's wire format
//! (OpenAI, Anthropic, Gemini) and back.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Universal generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LLMRequest {
    /// Fully rendered prompt text
    pub prompt: String,

    /// Optional instruction hoisted to the provider's system slot
    pub system_prompt: Option<String>,

    /// JSON Schema describing the expected structured reply; absent for
    /// free-text generation
    pub output_schema: Option<Value>,

    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// Universal generation response
#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
    pub finish_reason: FinishReason,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Error(String),
}

/// Universal provider trait
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Provider name (e.g., "gemini", "openai", "anthropic")
    fn name(&self) -> &str;

    /// Generate completion
    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError>;

    /// Get supported models
    fn supported_models(&self) -> Vec<String>;

    /// Validate request for this provider
    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError>;
}

#[derive(Debug, thiserror::Error)]
pub enum LLMError {
    #[error("Authentication failed: {0}")]
    Authentication(String),
    #[error("Rate limit exceeded")]
    RateLimit,
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Provider error: {0}")]
    Provider(String),
}

/// HTTP client settings shared by all provider adapters
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(
                crate::config::constants::defaults::DEFAULT_REQUEST_TIMEOUT_SECS,
            ),
            connect_timeout: Duration::from_secs(
                crate::config::constants::defaults::DEFAULT_CONNECT_TIMEOUT_SECS,
            ),
            user_agent: format!("mentora/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Build a reqwest client with the adapter-wide timeout policy. One attempt
/// per call; retries are a caller concern and none exist in this crate.
pub(crate) fn build_http_client(config: &HttpClientConfig) -> Result<reqwest::Client, LLMError> {
    reqwest::Client::builder()
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| LLMError::Network(format!("failed to build HTTP client: {e}")))
}

/// Map a non-success HTTP status and body onto the error taxonomy. Shared by
/// every adapter so status handling stays uniform.
pub(crate) fn error_for_status(provider: &str, status: u16, body: &str) -> LLMError {
    if status == 401 || status == 403 {
        return LLMError::Authentication(format!("{provider} rejected the API key: {body}"));
    }
    if status == 429
        || body.contains("insufficient_quota")
        || body.contains("quota")
        || body.contains("rate limit")
    {
        return LLMError::RateLimit;
    }
    LLMError::Provider(format!("{provider} HTTP {status}: {body}"))
}

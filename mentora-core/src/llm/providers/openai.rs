//! OpenAI wire adapter
//!
//! Structured replies are requested through `response_format` with a named
//! JSON schema.

use crate::config::constants::{models, urls};
use crate::llm::factory::ProviderConfig;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Usage, build_http_client,
    error_for_status,
};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

pub struct OpenAIProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl OpenAIProvider {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, LLMError> {
        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            http_client: build_http_client(&config.http)?,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| urls::OPENAI_API_BASE.to_string()),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| models::openai::DEFAULT_MODEL.to_string()),
        })
    }

    fn build_request_body(&self, request: &LLMRequest) -> Value {
        let mut messages = Vec::new();
        if let Some(system) = &request.system_prompt {
            messages.push(json!({"role": "system", "content": system}));
        }
        messages.push(json!({"role": "user", "content": request.prompt}));

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(schema) = &request.output_schema {
            let name = schema
                .get("title")
                .and_then(|t| t.as_str())
                .unwrap_or("structured_reply");
            body["response_format"] = json!({
                "type": "json_schema",
                "json_schema": {
                    "name": name,
                    "schema": schema,
                    "strict": false
                }
            });
        }

        body
    }

    fn parse_response(response_json: Value) -> Result<LLMResponse, LLMError> {
        let choices = response_json
            .get("choices")
            .and_then(|c| c.as_array())
            .ok_or_else(|| LLMError::Provider("OpenAI reply has no choices".to_string()))?;

        let choice = choices
            .first()
            .ok_or_else(|| LLMError::Provider("OpenAI reply has an empty choice list".to_string()))?;

        let content = choice
            .get("message")
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .unwrap_or_default()
            .to_string();

        let finish_reason = match choice.get("finish_reason").and_then(|f| f.as_str()) {
            Some("stop") | None => FinishReason::Stop,
            Some("length") => FinishReason::Length,
            Some("content_filter") => FinishReason::ContentFilter,
            Some(other) => FinishReason::Error(other.to_string()),
        };

        let usage = response_json.get("usage").map(|usage_value| Usage {
            prompt_tokens: usage_value
                .get("prompt_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            completion_tokens: usage_value
                .get("completion_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: usage_value
                .get("total_tokens")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
        });

        Ok(LLMResponse {
            content,
            usage,
            finish_reason,
        })
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        let body = self.build_request_body(&request);
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::Network(format!("OpenAI request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_for_status("OpenAI", status, &error_text));
        }

        let openai_response: Value = response
            .json()
            .await
            .map_err(|e| LLMError::Provider(format!("OpenAI reply was not valid JSON: {e}")))?;

        Self::parse_response(openai_response)
    }

    fn supported_models(&self) -> Vec<String> {
        models::openai::SUPPORTED_MODELS
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    fn validate_request(&self, request: &LLMRequest) -> Result<(), LLMError> {
        if request.prompt.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Prompt cannot be empty".to_string(),
            ));
        }
        if self.model.is_empty() {
            return Err(LLMError::InvalidRequest(
                "Model cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

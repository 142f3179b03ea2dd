//! Anthropic wire adapter
//!
//! The Messages API has no structured-output parameter, so the output schema
//! is appended to the prompt as an instruction. `max_tokens` is mandatory and
//! falls back to the crate-wide default when the request leaves it unset.

use crate::config::constants::{defaults, models, urls};
use crate::llm::factory::ProviderConfig;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Usage, build_http_client,
    error_for_status,
};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

pub struct AnthropicProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl AnthropicProvider {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, LLMError> {
        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            http_client: build_http_client(&config.http)?,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| urls::ANTHROPIC_API_BASE.to_string()),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| models::anthropic::DEFAULT_MODEL.to_string()),
        })
    }

    fn build_request_body(&self, request: &LLMRequest) -> Value {
        let mut prompt = request.prompt.clone();
        if let Some(schema) = &request.output_schema {
            prompt.push_str(
                "\n\nRespond with a single JSON value that conforms to this JSON Schema, with no surrounding text:\n",
            );
            prompt.push_str(&schema.to_string());
        }

        let mut body = json!({
            "model": self.model,
            "max_tokens": request
                .max_tokens
                .unwrap_or(defaults::DEFAULT_MAX_OUTPUT_TOKENS),
            "messages": [{"role": "user", "content": prompt}],
        });

        if let Some(system) = &request.system_prompt {
            body["system"] = json!(system);
        }
        if let Some(temperature) = request.temperature {
            body["temperature"] = json!(temperature);
        }

        body
    }

    fn parse_response(response_json: Value) -> Result<LLMResponse, LLMError> {
        let blocks = response_json
            .get("content")
            .and_then(|c| c.as_array())
            .ok_or_else(|| LLMError::Provider("Anthropic reply has no content".to_string()))?;

        let mut text_parts = Vec::new();
        for block in blocks {
            if block.get("type").and_then(|t| t.as_str()) == Some("text") {
                if let Some(text) = block.get("text").and_then(|t| t.as_str()) {
                    text_parts.push(text);
                }
            }
        }

        let stop_reason = response_json
            .get("stop_reason")
            .and_then(|sr| sr.as_str())
            .unwrap_or("end_turn");
        let finish_reason = match stop_reason {
            "end_turn" | "stop_sequence" => FinishReason::Stop,
            "max_tokens" => FinishReason::Length,
            "refusal" => FinishReason::ContentFilter,
            other => FinishReason::Error(other.to_string()),
        };

        let usage = response_json.get("usage").map(|usage_value| {
            let prompt_tokens = usage_value
                .get("input_tokens")
                .and_then(|it| it.as_u64())
                .unwrap_or(0) as u32;
            let completion_tokens = usage_value
                .get("output_tokens")
                .and_then(|ot| ot.as_u64())
                .unwrap_or(0) as u32;
            Usage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            }
        });

        Ok(LLMResponse {
            content: text_parts.join(""),
            usage,
            finish_reason,
        })
    }
}

#[async_trait]
impl LLMProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        let body = self.build_request_body(&request);
        let url = format!("{}/messages", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", urls::ANTHROPIC_API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::Network(format!("Anthropic request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_for_status("Anthropic", status, &error_text));
        }

        let anthropic_response: Value = response
            .json()
            .await
            .map_err(|e| LLMError::Provider(format!("Anthropic reply was not valid JSON: {e}")))?;

        Self::parse_response(anthropic_response)
    }

    fn supported_models(&self) -> Vec<String> {
        models::anthropic::SUPPORTED_MODELS
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
        if !self.supported_models().contains(&self.model) {
            return Err(LLMError::InvalidRequest(format!(
                "Unsupported Anthropic model: {}",
                self.model
            )));
        }
        Ok(())
    }
}

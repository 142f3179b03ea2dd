//! Gemini wire adapter
//!
//! Structured replies are requested natively through `generationConfig` with
//! `responseMimeType: "application/json"` and a `responseSchema`.

use crate::config::constants::{models, urls};
use crate::llm::factory::ProviderConfig;
use crate::llm::provider::{
    FinishReason, LLMError, LLMProvider, LLMRequest, LLMResponse, Usage, build_http_client,
    error_for_status,
};
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Value, json};

pub struct GeminiProvider {
    api_key: String,
    http_client: HttpClient,
    base_url: String,
    model: String,
}

impl GeminiProvider {
    pub fn from_config(config: &ProviderConfig) -> Result<Self, LLMError> {
        Ok(Self {
            api_key: config.api_key.clone().unwrap_or_default(),
            http_client: build_http_client(&config.http)?,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| urls::GEMINI_API_BASE.to_string()),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| models::google::DEFAULT_MODEL.to_string()),
        })
    }

    fn build_request_body(request: &LLMRequest) -> Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{"text": request.prompt}]
            }]
        });

        if let Some(system) = &request.system_prompt {
            body["systemInstruction"] = json!({
                "parts": [{"text": system}]
            });
        }

        let mut generation_config = serde_json::Map::new();
        if let Some(temperature) = request.temperature {
            generation_config.insert("temperature".to_string(), json!(temperature));
        }
        if let Some(max_tokens) = request.max_tokens {
            generation_config.insert("maxOutputTokens".to_string(), json!(max_tokens));
        }
        if let Some(schema) = &request.output_schema {
            generation_config.insert("responseMimeType".to_string(), json!("application/json"));
            generation_config.insert("responseSchema".to_string(), schema.clone());
        }
        if !generation_config.is_empty() {
            body["generationConfig"] = Value::Object(generation_config);
        }

        body
    }

    fn parse_response(response: Value) -> Result<LLMResponse, LLMError> {
        let candidates = response
            .get("candidates")
            .and_then(|c| c.as_array())
            .ok_or_else(|| LLMError::Provider("Gemini reply has no candidates".to_string()))?;

        let candidate = candidates
            .first()
            .ok_or_else(|| LLMError::Provider("Gemini reply has an empty candidate list".to_string()))?;

        let mut content = String::new();
        if let Some(parts) = candidate
            .get("content")
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.as_array())
        {
            for part in parts {
                if let Some(text) = part["text"].as_str() {
                    content.push_str(text);
                }
            }
        }

        let finish_reason = match candidate["finishReason"].as_str() {
            Some("STOP") => FinishReason::Stop,
            Some("MAX_TOKENS") => FinishReason::Length,
            Some("SAFETY") | Some("PROHIBITED_CONTENT") => FinishReason::ContentFilter,
            Some(other) => FinishReason::Error(other.to_string()),
            None => FinishReason::Stop,
        };

        let usage = response.get("usageMetadata").map(|meta| Usage {
            prompt_tokens: meta
                .get("promptTokenCount")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            completion_tokens: meta
                .get("candidatesTokenCount")
                .and_then(|v| v.as_u64())
                .unwrap_or(0) as u32,
            total_tokens: meta
                .get("totalTokenCount")
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
impl LLMProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(&self, request: LLMRequest) -> Result<LLMResponse, LLMError> {
        let body = Self::build_request_body(&request);

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| LLMError::Network(format!("Gemini request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(error_for_status("Gemini", status, &error_text));
        }

        let gemini_response: Value = response
            .json()
            .await
            .map_err(|e| LLMError::Provider(format!("Gemini reply was not valid JSON: {e}")))?;

        Self::parse_response(gemini_response)
    }

    fn supported_models(&self) -> Vec<String> {
        models::google::SUPPORTED_MODELS
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
                "Unsupported Gemini model: {}",
                self.model
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_schema() -> LLMRequest {
        LLMRequest {
            prompt: "Summarize cell division.".to_string(),
            system_prompt: None,
            output_schema: Some(json!({
                "type": "object",
                "properties": {"summary": {"type": "string"}},
                "required": ["summary"]
            })),
            max_tokens: Some(1024),
            temperature: Some(0.2),
        }
    }

    #[test]
    fn request_body_carries_prompt_and_schema() {
        let body = GeminiProvider::build_request_body(&request_with_schema());

        assert_eq!(
            body["contents"][0]["parts"][0]["text"],
            "Summarize cell division."
        );
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["required"][0],
            "summary"
        );
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
    }

    #[test]
    fn request_body_omits_generation_config_without_knobs() {
        let request = LLMRequest {
            prompt: "Hello".to_string(),
            system_prompt: Some("Be brief.".to_string()),
            output_schema: None,
            max_tokens: None,
            temperature: None,
        };
        let body = GeminiProvider::build_request_body(&request);

        assert!(body.get("generationConfig").is_none());
        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "Be brief.");
    }

    #[test]
    fn parse_response_joins_parts_and_reads_usage() {
        let response = json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"summary\":"}, {"text": "\"ok\"}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 7,
                "totalTokenCount": 19
            }
        });

        let parsed = GeminiProvider::parse_response(response).unwrap();
        assert_eq!(parsed.content, "{\"summary\":\"ok\"}");
        assert_eq!(parsed.finish_reason, FinishReason::Stop);
        let usage = parsed.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 12);
        assert_eq!(usage.completion_tokens, 7);
        assert_eq!(usage.total_tokens, 19);
    }

    #[test]
    fn parse_response_maps_truncation_and_safety() {
        let truncated = json!({
            "candidates": [{"content": {"parts": [{"text": "part"}]}, "finishReason": "MAX_TOKENS"}]
        });
        assert_eq!(
            GeminiProvider::parse_response(truncated).unwrap().finish_reason,
            FinishReason::Length
        );

        let filtered = json!({
            "candidates": [{"content": {"parts": []}, "finishReason": "SAFETY"}]
        });
        assert_eq!(
            GeminiProvider::parse_response(filtered).unwrap().finish_reason,
            FinishReason::ContentFilter
        );
    }

    #[test]
    fn parse_response_fails_without_candidates() {
        let err = GeminiProvider::parse_response(json!({"promptFeedback": {}})).unwrap_err();
        assert!(matches!(err, LLMError::Provider(_)));
    }
}

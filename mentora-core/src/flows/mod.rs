//! Schema-validated generation flows
//!
//! Every AI feature is one [`Flow`]: a typed input record, a fixed prompt
//! template, a JSON Schema for the reply, and an optional post-process step.
//! [`FlowEngine::run`] executes the single linear pipeline behind each
//! feature: validate input, render the prompt, invoke the provider once,
//! parse and validate the reply, post-process, return the typed result.
//! There is no caching and no retry; every failure mode propagates to the
//! caller as one [`FlowError`].

pub mod adapt;
pub mod quiz;
pub mod summarize;

pub use adapt::{
    AdaptLearningPath, AdaptLearningPathInput, AdaptLearningPathOutput, StudentPerformanceData,
};
pub use quiz::{
    GenerateQuizQuestions, GenerateQuizQuestionsInput, GenerateQuizQuestionsOutput, QuizQuestion,
};
pub use summarize::{SummarizeLessonTopic, SummarizeLessonTopicInput, SummarizeLessonTopicOutput};

use crate::config::ProviderSettings;
use crate::llm::provider::{FinishReason, LLMError, LLMProvider, LLMRequest};
use crate::prompts::{PromptTemplate, TemplateError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use validator::Validate;

/// Difficulty level attached to quiz questions and adaptation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure taxonomy for one flow invocation. Input validation, provider
/// transport, and output validation each surface separately so callers can
/// map them onto their own boundaries.
#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("input validation failed: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),
    #[error("prompt template error: {0}")]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Provider(#[from] LLMError),
    #[error("output validation failed: {0}")]
    InvalidOutput(String),
}

/// One AI feature, described as data plus two optional hooks
pub trait Flow: Send + Sync {
    type Input: Validate + Send;
    type Output: DeserializeOwned;

    fn name(&self) -> &'static str;

    /// The fixed prompt template for this feature
    fn template(&self) -> &'static PromptTemplate;

    /// Bind the validated input's fields to the template's keys
    fn bindings(&self, input: &Self::Input) -> Vec<(&'static str, String)>;

    /// JSON Schema describing the reply shape, forwarded to the provider
    fn output_schema(&self) -> Value;

    /// Extra checks the serde shape cannot express (enum sets and field
    /// presence are handled by deserialization already)
    fn validate_output(&self, _output: &Self::Output) -> Result<(), FlowError> {
        Ok(())
    }

    /// Transform applied after output validation
    fn post_process(&self, output: Self::Output) -> Self::Output {
        output
    }
}

/// Generation knobs forwarded with every provider call
#[derive(Debug, Clone, Copy)]
pub struct GenerationSettings {
    pub temperature: f32,
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: crate::config::constants::defaults::DEFAULT_TEMPERATURE,
            max_output_tokens: crate::config::constants::defaults::DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }
}

impl From<&ProviderSettings> for GenerationSettings {
    fn from(settings: &ProviderSettings) -> Self {
        Self {
            temperature: settings.temperature,
            max_output_tokens: settings.max_output_tokens,
        }
    }
}

/// Shared runner executing any [`Flow`] against one configured provider
pub struct FlowEngine {
    provider: Arc<dyn LLMProvider>,
    settings: GenerationSettings,
}

impl FlowEngine {
    pub fn new(provider: Arc<dyn LLMProvider>, settings: GenerationSettings) -> Self {
        Self { provider, settings }
    }

    /// Run one flow end to end: validate, render, invoke, parse, check,
    /// post-process. Identical inputs re-invoke the provider every time.
    pub async fn run<F: Flow>(&self, flow: &F, input: F::Input) -> Result<F::Output, FlowError> {
        input.validate()?;

        let bindings = flow.bindings(&input);
        let prompt = flow.template().render(&bindings)?;

        let request = LLMRequest {
            prompt,
            system_prompt: None,
            output_schema: Some(flow.output_schema()),
            max_tokens: Some(self.settings.max_output_tokens),
            temperature: Some(self.settings.temperature),
        };
        self.provider.validate_request(&request)?;

        tracing::info!(
            flow = flow.name(),
            provider = self.provider.name(),
            "invoking generation provider"
        );
        let response = self.provider.generate(request).await?;

        if response.finish_reason != FinishReason::Stop {
            tracing::warn!(
                flow = flow.name(),
                finish_reason = ?response.finish_reason,
                "generation finished abnormally"
            );
        }
        if let Some(usage) = &response.usage {
            tracing::info!(
                flow = flow.name(),
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "generation completed"
            );
        }

        let value = parse_reply(&response.content)?;
        let output: F::Output = serde_json::from_value(value).map_err(|e| {
            FlowError::InvalidOutput(format!("reply does not match the output schema: {e}"))
        })?;
        flow.validate_output(&output)?;

        Ok(flow.post_process(output))
    }
}

/// Parse a provider reply into JSON, tolerating a Markdown code fence around
/// the payload. The payload itself must be a single valid JSON value.
fn parse_reply(content: &str) -> Result<Value, FlowError> {
    let stripped = strip_code_fence(content);
    serde_json::from_str(stripped)
        .map_err(|e| FlowError::InvalidOutput(format!("reply is not valid JSON: {e}")))
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

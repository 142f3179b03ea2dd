//! # mentora-core - Runtime for Mentora
//!
//! `mentora-core` powers the Mentora education server. It provides the
//! reusable building blocks for schema-validated AI generation flows,
//! multi-provider LLM access, and learning module storage.
//!
//! ## Highlights
//!
//! - **Provider Abstraction**: unified LLM interface with adapters for
//!   Gemini, OpenAI, and Anthropic, each translating the shared request
//!   shape (prompt plus reply JSON Schema) into its own wire format.
//! - **Schema-Validated Flows**: every AI feature is a typed input record,
//!   a fixed prompt template, and a reply schema, executed through one
//!   linear pipeline with no caching and no retries.
//! - **Module Storage**: async store contract for teacher-authored lesson
//!   modules, with an in-memory implementation and seedable sample data.
//! - **Configuration-First**: driven by `mentora.toml`, with model names,
//!   endpoints, and limits centralized in `config::constants`.
//!
//! ## Architecture Overview
//!
//! - `config/`: configuration loader, defaults, and constants.
//! - `llm/`: provider trait, factory, and the three wire adapters.
//! - `prompts/`: fixed prompt templates with named placeholders.
//! - `flows/`: flow descriptors and the engine that runs them.
//! - `modules/`: learning module records and the store contract.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use std::sync::Arc;
//!
//! use mentora_core::config::MentoraConfig;
//! use mentora_core::flows::{FlowEngine, SummarizeLessonTopic, SummarizeLessonTopicInput};
//! use mentora_core::llm::{ProviderConfig, create_provider_with_config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let config = MentoraConfig::load(None)?;
//!     let provider = create_provider_with_config(
//!         &config.provider.name,
//!         &ProviderConfig {
//!             api_key: std::env::var("GEMINI_API_KEY").ok(),
//!             ..ProviderConfig::default()
//!         },
//!     )?;
//!     let engine = FlowEngine::new(Arc::from(provider), (&config.provider).into());
//!
//!     let input = SummarizeLessonTopicInput {
//!         topic: "Photosynthesis".to_string(),
//!         lesson_content: "Light reactions capture energy; the Calvin cycle fixes carbon."
//!             .to_string(),
//!     };
//!     let output = engine.run(&SummarizeLessonTopic, input).await?;
//!     println!("{}", output.summary);
//!     Ok(())
//! }
//! ```

// Public modules
pub mod config;
pub mod flows;
pub mod llm;
pub mod modules;
pub mod prompts;

// Re-exports for convenience
pub use config::{MentoraConfig, ProviderSettings, ServerConfig};
pub use flows::{
    AdaptLearningPath, AdaptLearningPathInput, AdaptLearningPathOutput, Difficulty, Flow,
    FlowEngine, FlowError, GenerateQuizQuestions, GenerateQuizQuestionsInput,
    GenerateQuizQuestionsOutput, GenerationSettings, QuizQuestion, StudentPerformanceData,
    SummarizeLessonTopic, SummarizeLessonTopicInput, SummarizeLessonTopicOutput,
};
pub use llm::{
    AnthropicProvider, FinishReason, GeminiProvider, LLMError, LLMProvider, LLMRequest,
    LLMResponse, OpenAIProvider, ProviderConfig, create_provider_with_config,
};
pub use modules::{
    Exercise, ExerciseDraft, ExerciseKind, InMemoryModuleStore, Module, ModuleDraft, ModuleStore,
    StoreError, sample_modules,
};
pub use prompts::PromptTemplate;

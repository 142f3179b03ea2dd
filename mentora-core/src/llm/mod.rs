//! # LLM integration layer
//!
//! A unified interface over the hosted text-generation providers Mentora can
//! talk to. Each adapter translates the universal [`provider::LLMRequest`]
//! into its provider's wire format, performs a single HTTP round trip, and
//! maps the reply back into a [`provider::LLMResponse`].
//!
//! ## Supported providers
//!
//! | Provider | Structured output | Default model |
//! |-----------|-------------------------------------|------------------------|
//! | Gemini | native (`responseSchema`) | gemini-2.5-flash |
//! | OpenAI | native (`response_format`) | gpt-4o-mini |
//! | Anthropic | schema appended to the prompt text | claude-sonnet-4-20250514 |
//!
//! Providers are built through the [`factory::LLMFactory`] registry, keyed by
//! provider name; the factory can also infer the provider from a model id.

pub mod factory;
pub mod provider;
pub mod providers;

pub use factory::{LLMFactory, ProviderConfig, create_provider_with_config, get_factory};
pub use provider::{
    FinishReason, HttpClientConfig, LLMError, LLMProvider, LLMRequest, LLMResponse, Usage,
};
pub use providers::{AnthropicProvider, GeminiProvider, OpenAIProvider};

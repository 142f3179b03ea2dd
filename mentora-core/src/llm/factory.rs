use super::providers::{AnthropicProvider, GeminiProvider, OpenAIProvider};
use crate::llm::provider::{HttpClientConfig, LLMError, LLMProvider};
use std::collections::HashMap;

type ProviderConstructor =
    Box<dyn Fn(&ProviderConfig) -> Result<Box<dyn LLMProvider>, LLMError> + Send + Sync>;

/// Provider factory and registry
pub struct LLMFactory {
    providers: HashMap<String, ProviderConstructor>,
}

#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub http: HttpClientConfig,
}

impl LLMFactory {
    pub fn new() -> Self {
        let mut factory = Self {
            providers: HashMap::new(),
        };

        // Register built-in providers
        factory.register_provider("gemini", |config: &ProviderConfig| {
            Ok(Box::new(GeminiProvider::from_config(config)?) as Box<dyn LLMProvider>)
        });

        factory.register_provider("openai", |config: &ProviderConfig| {
            Ok(Box::new(OpenAIProvider::from_config(config)?) as Box<dyn LLMProvider>)
        });

        factory.register_provider("anthropic", |config: &ProviderConfig| {
            Ok(Box::new(AnthropicProvider::from_config(config)?) as Box<dyn LLMProvider>)
        });

        factory
    }

    /// Register a new provider
    pub fn register_provider<F>(&mut self, name: &str, factory_fn: F)
    where
        F: Fn(&ProviderConfig) -> Result<Box<dyn LLMProvider>, LLMError> + Send + Sync + 'static,
    {
        self.providers
            .insert(name.to_string(), Box::new(factory_fn));
    }

    /// Create provider instance
    pub fn create_provider(
        &self,
        provider_name: &str,
        config: &ProviderConfig,
    ) -> Result<Box<dyn LLMProvider>, LLMError> {
        let factory_fn = self.providers.get(provider_name).ok_or_else(|| {
            LLMError::InvalidRequest(format!("Unknown provider: {provider_name}"))
        })?;

        factory_fn(config)
    }

    /// List available providers
    pub fn list_providers(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Determine provider name from model string
    pub fn provider_from_model(&self, model: &str) -> Option<String> {
        let m = model.to_lowercase();
        if m.starts_with("gpt-") || m.starts_with("o1") || m.starts_with("o3") || m.starts_with("o4")
        {
            Some("openai".to_string())
        } else if m.starts_with("claude-") {
            Some("anthropic".to_string())
        } else if m.contains("gemini") {
            Some("gemini".to_string())
        } else {
            None
        }
    }
}

impl Default for LLMFactory {
    fn default() -> Self {
        Self::new()
    }
}

/// Global factory instance
use std::sync::{LazyLock, Mutex};

static FACTORY: LazyLock<Mutex<LLMFactory>> = LazyLock::new(|| Mutex::new(LLMFactory::new()));

/// Get global factory instance
pub fn get_factory() -> &'static Mutex<LLMFactory> {
    &FACTORY
}

/// Create provider with full configuration
pub fn create_provider_with_config(
    provider_name: &str,
    config: &ProviderConfig,
) -> Result<Box<dyn LLMProvider>, LLMError> {
    let factory = get_factory()
        .lock()
        .map_err(|_| LLMError::Provider("provider registry lock poisoned".to_string()))?;
    factory.create_provider(provider_name, config)
}

//! Mentora configuration module
//!
//! Handles loading configuration from mentora.toml files. Every field carries a
//! default so a missing or partial file still yields a usable local setup.

pub mod constants;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use constants::defaults;

/// Top-level configuration loaded from mentora.toml
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MentoraConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Generation provider settings
    #[serde(default)]
    pub provider: ProviderSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Bind address
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Settings for the hosted text-generation provider
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProviderSettings {
    /// Provider name: "gemini", "openai" or "anthropic"
    #[serde(default = "default_provider")]
    pub name: String,

    /// Model identifier passed through to the provider
    #[serde(default = "default_model")]
    pub model: String,

    /// Override for the provider API base URL
    #[serde(default)]
    pub base_url: Option<String>,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Sampling temperature forwarded with every generation call
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token cap forwarded with every generation call
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: default_provider(),
            model: default_model(),
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

impl ProviderSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Environment variables consulted for this provider's API key, in order
    pub fn api_key_env_vars(&self) -> &'static [&'static str] {
        match self.name.as_str() {
            "openai" => &[constants::env_keys::OPENAI_API_KEY],
            "anthropic" => &[constants::env_keys::ANTHROPIC_API_KEY],
            _ => &[
                constants::env_keys::GEMINI_API_KEY,
                constants::env_keys::GOOGLE_API_KEY,
            ],
        }
    }
}

impl MentoraConfig {
    /// Load configuration from an explicit path, or from mentora.toml in the
    /// working directory, falling back to defaults when no file exists.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(explicit) => Self::from_file(explicit),
            None => {
                let candidate = Path::new(defaults::CONFIG_FILE_NAME);
                if candidate.exists() {
                    Self::from_file(candidate)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }
}

fn default_host() -> String {
    defaults::DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    defaults::DEFAULT_PORT
}
fn default_provider() -> String {
    defaults::DEFAULT_PROVIDER.to_string()
}
fn default_model() -> String {
    defaults::DEFAULT_MODEL.to_string()
}
fn default_request_timeout_secs() -> u64 {
    defaults::DEFAULT_REQUEST_TIMEOUT_SECS
}
fn default_connect_timeout_secs() -> u64 {
    defaults::DEFAULT_CONNECT_TIMEOUT_SECS
}
fn default_temperature() -> f32 {
    defaults::DEFAULT_TEMPERATURE
}
fn default_max_output_tokens() -> u32 {
    defaults::DEFAULT_MAX_OUTPUT_TOKENS
}

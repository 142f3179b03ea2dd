use std::path::PathBuf;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use anyhow::{Context, Result, anyhow};
use clap::Parser;
use mentora::state::AppState;
use mentora::{error, routes};
use mentora_core::config::{MentoraConfig, ProviderSettings};
use mentora_core::flows::FlowEngine;
use mentora_core::llm::{HttpClientConfig, ProviderConfig, create_provider_with_config};
use mentora_core::modules::{InMemoryModuleStore, ModuleStore};

#[derive(Parser, Debug)]
#[command(
    name = "mentora",
    version,
    about = "AI-powered education server with lesson summarization, quiz generation, and adaptive difficulty"
)]
struct Cli {
    /// Configuration file; defaults to mentora.toml in the working directory
    /// when present
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Bind host, overriding the configuration file
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding the configuration file
    #[arg(long)]
    port: Option<u16>,
}

/// Read the provider's API key from the first environment variable that
/// carries one.
fn resolve_api_key(settings: &ProviderSettings) -> Result<String> {
    for var in settings.api_key_env_vars() {
        if let Ok(value) = std::env::var(var) {
            if !value.trim().is_empty() {
                return Ok(value);
            }
        }
    }
    Err(anyhow!(
        "no API key found for provider '{}'; set one of: {}",
        settings.name,
        settings.api_key_env_vars().join(", ")
    ))
}

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mentora=info,mentora_core=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let mut config =
        MentoraConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let api_key = resolve_api_key(&config.provider)?;
    let provider_config = ProviderConfig {
        api_key: Some(api_key),
        base_url: config.provider.base_url.clone(),
        model: Some(config.provider.model.clone()),
        http: HttpClientConfig {
            request_timeout: config.provider.request_timeout(),
            connect_timeout: config.provider.connect_timeout(),
            ..HttpClientConfig::default()
        },
    };
    let provider = create_provider_with_config(&config.provider.name, &provider_config)
        .with_context(|| format!("failed to initialize provider '{}'", config.provider.name))?;

    let engine = FlowEngine::new(Arc::from(provider), (&config.provider).into());
    let modules: Arc<dyn ModuleStore> = Arc::new(InMemoryModuleStore::with_samples());
    let state = web::Data::new(AppState::new(engine, modules));

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        provider = %config.provider.name,
        model = %config.provider.model,
        "starting mentora server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(
                web::JsonConfig::default()
                    .limit(1024 * 1024)
                    .error_handler(error::json_error_handler),
            )
            .app_data(state.clone())
            .service(routes::flows::configure_routes())
            .service(routes::modules::configure_routes())
            .service(routes::health::configure_routes())
    })
    .bind((config.server.host.clone(), config.server.port))
    .with_context(|| {
        format!(
            "failed to bind {}:{}",
            config.server.host, config.server.port
        )
    })?
    .run()
    .await
    .context("server error")
}

//! PomoTask Server
//!
//! HTTP front for the extraction pipeline: clarify, categorize and motivate
//! routes backed by a chat-completions model.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use pomotask_extractor::{Extractor, ExtractorError};
use pomotask_llm::ChatCompletionsProvider;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Pipeline could not be set up
    #[error("Extractor error: {0}")]
    Extractor(#[from] ExtractorError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` overrides the default `info` filter. Calling this twice is
/// harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build the chat-completions provider described by `config`
pub fn build_provider(config: &ServerConfig) -> ChatCompletionsProvider {
    let provider = ChatCompletionsProvider::new(&config.llm.endpoint, &config.llm.model);
    match config.llm.api_key() {
        Some(key) => provider.with_api_key(key),
        None => {
            warn!(
                "{} is not set; sending unauthenticated requests",
                config.llm.api_key_env
            );
            provider
        }
    }
}

/// Start the HTTP server
///
/// Builds the provider and extractor from `config` and serves until the
/// process stops.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    init_tracing();

    info!("Starting PomoTask server");
    info!("Bind address: {}", config.bind_addr());
    info!("Model: {} via {}", config.llm.model, config.llm.endpoint);

    let extractor = Extractor::try_new(build_provider(&config), config.extractor.clone())?;
    let app = create_router(AppState { extractor });

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server running on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

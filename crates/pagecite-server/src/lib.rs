//! Pagecite Server
//!
//! HTTP front end for the question-answering pipeline. Documents are PDFs
//! stored as files in a directory; the document id is the file name.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use pagecite_core::Answerer;
use pagecite_llm::{LlmError, OpenRouterProvider};
use pagecite_pdf::PdfTextExtractor;
use pagecite_store::DirectoryStore;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Language-model provider could not be set up
    #[error("LLM provider error: {0}")]
    Llm(#[from] LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`. Safe to call more than once.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Start the HTTP server
///
/// Wires the directory store, PDF extractor and OpenRouter provider into an
/// [`Answerer`] and serves it until the listener fails.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    info!("Starting Pagecite server");
    info!("Bind address: {}", config.bind_addr());
    info!("Documents directory: {}", config.documents_dir.display());
    info!("Model: {}", config.llm.model);

    let api_key = config.api_key();
    if api_key.is_none() {
        warn!(
            "{} is not set; answers will apologize until it is",
            config.api_key_env
        );
    }

    let store = DirectoryStore::new(config.documents_dir.clone());
    let llm = OpenRouterProvider::new(config.llm.clone(), api_key)?;
    let answerer = Answerer::new(store, PdfTextExtractor::new(), llm, config.qa.clone());

    let state = AppState {
        answerer: Arc::new(answerer),
    };
    let app = create_router(state);

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}

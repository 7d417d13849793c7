//! Foresight Web
//!
//! A small form-driven front end for the transcript pipeline: operators
//! upload transcript files into the source directory and set the oracle API
//! key. Each action leaves a one-shot flash message on the page.

#![warn(missing_docs)]

pub mod config;
pub mod flash;
pub mod handlers;
pub mod page;

use config::ServerConfig;
use foresight_store::CredentialStore;
use handlers::{create_router, AppState};
use tokio::net::TcpListener;
use tracing::info;

/// Web server error
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Server binding or directory setup error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Start the web server
///
/// Creates the source directory if needed, then serves until the process
/// is stopped.
pub async fn start_server(config: ServerConfig) -> Result<(), WebError> {
    info!("Starting Foresight web server");
    info!("Source directory: {}", config.pipeline.source_dir.display());
    info!("Credential file: {}", config.credentials_path.display());

    tokio::fs::create_dir_all(&config.pipeline.source_dir).await?;

    let state = AppState::new(
        config.pipeline.source_dir.clone(),
        CredentialStore::new(&config.credentials_path),
    );
    let app = create_router(state, config.max_upload_bytes());

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Listening on http://{}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| WebError::Server(e.to_string()))?;

    Ok(())
}

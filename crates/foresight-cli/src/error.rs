//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Oracle client could not be set up
    #[error("LLM error: {0}")]
    Llm(#[from] foresight_llm::LlmError),

    /// Extraction run aborted
    #[error("Extraction failed: {0}")]
    Extractor(#[from] foresight_extractor::ExtractorError),

    /// Consolidation run aborted
    #[error("Consolidation failed: {0}")]
    Consolidator(#[from] foresight_consolidator::ConsolidatorError),

    /// Credential or CSV store error
    #[error("Store error: {0}")]
    Store(#[from] foresight_store::StoreError),

    /// No API key from the command line, the environment or the credential file
    #[error("No API key configured. Pass --api-key, set FORESIGHT_API_KEY or run 'foresight credentials set <KEY>'.")]
    MissingApiKey,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

//! Error types for the Extractor

use foresight_store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during extraction
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Oracle call exceeded the extraction timeout
    #[error("Extraction timed out after {0}s")]
    Timeout(u64),

    /// Reply did not contain the expected structure
    #[error("Invalid reply format: {0}")]
    InvalidFormat(String),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Transcript directory does not exist
    #[error("Source directory not found: {}", .0.display())]
    SourceDirMissing(PathBuf),

    /// Filesystem error while listing transcripts
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::JsonParse(e.to_string())
    }
}

/// Errors that fail a single transcript without stopping the batch
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Transcript could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Transcript path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The oracle failed for this transcript
    #[error("Oracle failed: {0}")]
    Oracle(String),

    /// Rows could not be appended to the statement log
    #[error(transparent)]
    Store(#[from] StoreError),
}

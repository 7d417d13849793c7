//! Foresight Storage Layer
//!
//! Flat-file persistence for the extraction pipeline.
//!
//! # Architecture
//!
//! - Append-only statement log (one CSV row per extracted statement)
//! - Consolidated CSV, rewritten in full on every run
//! - JSON credential file holding the oracle API key
//!
//! # Examples
//!
//! ```no_run
//! use foresight_store::{read_statement_rows, StatementLog};
//!
//! let log = StatementLog::new("financial_information.csv");
//! log.append(&[]).unwrap();
//! let rows = read_statement_rows(log.path()).unwrap();
//! ```

#![warn(missing_docs)]

mod consolidated;
mod credentials;
mod rows;
mod statement_log;

use thiserror::Error;

pub use consolidated::write_consolidated;
pub use credentials::CredentialStore;
pub use rows::{
    statement_columns, ConsolidatedRow, StatementRow, CATEGORY_COLUMN, EXTRACTION_DATE_COLUMN,
    METADATA_COLUMNS, SENTENCE_COLUMN, SPEAKER_COLUMN,
};
pub use statement_log::{read_statement_rows, StatementLog};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Credential file is not valid JSON
    #[error("Credential file error: {0}")]
    Json(#[from] serde_json::Error),

    /// None of the fallback encodings could decode the file
    #[error("Could not decode {0} as UTF-8, GBK or Windows-1252")]
    Encoding(String),

    /// Attempt to persist a blank API key
    #[error("API key must not be empty")]
    EmptyCredential,
}

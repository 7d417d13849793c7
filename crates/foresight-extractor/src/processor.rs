//! Single-transcript processing

use crate::error::ProcessError;
use crate::filename::parse_filename;
use foresight_domain::traits::StatementOracle;
use foresight_domain::TranscriptMetadata;
use foresight_store::{StatementLog, StatementRow};
use std::fmt::Display;
use std::fs;
use std::path::Path;
use tracing::info;

/// Timestamp format of the `extraction_date` column
pub const EXTRACTION_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of processing one transcript
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutcome {
    /// Base name of the transcript
    pub filename: String,
    /// Metadata derived from the name
    pub metadata: TranscriptMetadata,
    /// Rows appended to the statement log
    pub statements: usize,
}

/// Reads a transcript, asks the oracle, and appends the resulting rows
pub struct TranscriptProcessor<O> {
    oracle: O,
    log: StatementLog,
}

impl<O> TranscriptProcessor<O>
where
    O: StatementOracle + Sync,
    O::Error: Display,
{
    /// Create a processor writing to the given log
    pub fn new(oracle: O, log: StatementLog) -> Self {
        Self { oracle, log }
    }

    /// The oracle transcripts are sent to
    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// The statement log rows are appended to
    pub fn log(&self) -> &StatementLog {
        &self.log
    }

    /// Process one transcript file
    ///
    /// Invalid UTF-8 sequences in the transcript are dropped. When the
    /// oracle fails nothing is appended.
    pub async fn process(&self, path: &Path) -> Result<ProcessOutcome, ProcessError> {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = parse_filename(&filename);

        info!("Processing transcript: {}", filename);

        let bytes = fs::read(path).map_err(|source| ProcessError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes).replace(char::REPLACEMENT_CHARACTER, "");

        let statements = self
            .oracle
            .extract(&text)
            .await
            .map_err(|e| ProcessError::Oracle(e.to_string()))?;

        let extraction_date = chrono::Local::now()
            .format(EXTRACTION_DATE_FORMAT)
            .to_string();
        let rows: Vec<StatementRow> = statements
            .iter()
            .map(|statement| StatementRow::from_statement(&metadata, statement, &extraction_date))
            .collect();

        let written = self.log.append(&rows)?;
        info!("Completed {}: extracted {} statements", filename, written);

        Ok(ProcessOutcome {
            filename,
            metadata,
            statements: written,
        })
    }
}

//! Configuration for the Extractor and the batch pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the Extractor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    /// Maximum transcript length sent to the oracle (characters)
    pub max_text_length: usize,

    /// Maximum time for a single extraction call (seconds)
    pub extraction_timeout_secs: u64,
}

impl ExtractorConfig {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_text_length: 20_000,
            extraction_timeout_secs: 90,
        }
    }
}

/// Where transcripts come from and where rows go
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Directory scanned for transcripts
    pub source_dir: PathBuf,

    /// Append-only statement log
    pub statements_csv: PathBuf,

    /// Consolidated output, rewritten on every run
    pub consolidated_csv: PathBuf,

    /// Pause between consecutive oracle calls (seconds)
    pub delay_secs: u64,

    /// Required filename suffix
    pub file_extension: String,

    /// Required filename substring
    pub file_marker: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("data_source"),
            statements_csv: PathBuf::from("financial_information.csv"),
            consolidated_csv: PathBuf::from("consolidated_financial_information.csv"),
            delay_secs: 5,
            file_extension: ".txt".to_string(),
            file_marker: "Transcript".to_string(),
        }
    }
}

impl PipelineConfig {
    /// Get the inter-file delay as a Duration
    pub fn delay(&self) -> Duration {
        Duration::from_secs(self.delay_secs)
    }

    /// Whether a file name identifies a transcript
    pub fn is_transcript(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.file_extension) && file_name.contains(&self.file_marker)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.source_dir.as_os_str().is_empty() {
            return Err("source_dir must not be empty".to_string());
        }
        if self.statements_csv.as_os_str().is_empty() {
            return Err("statements_csv must not be empty".to_string());
        }
        if self.consolidated_csv.as_os_str().is_empty() {
            return Err("consolidated_csv must not be empty".to_string());
        }
        if self.statements_csv == self.consolidated_csv {
            return Err("statements_csv and consolidated_csv must differ".to_string());
        }
        Ok(())
    }
}

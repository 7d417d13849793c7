//! Sequential batch processing of a transcript directory

use crate::config::PipelineConfig;
use crate::error::ExtractorError;
use crate::processor::TranscriptProcessor;
use foresight_domain::traits::StatementOracle;
use std::fmt::{self, Display};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{error, info};

/// Statistics for one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Transcript files found
    pub discovered: usize,
    /// Files that yielded at least one statement
    pub succeeded: usize,
    /// Files processed successfully with no statements
    pub empty: usize,
    /// Files that failed, with the reason
    pub failed: Vec<(String, String)>,
    /// Rows appended across all files
    pub statements: usize,
    /// Rows appended per processed file, in processing order
    pub per_file: Vec<(String, usize)>,
}

impl BatchReport {
    /// One-line summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Processed {} transcript files: {} with statements, {} empty, {} failed ({} statements extracted)",
            self.discovered,
            self.succeeded,
            self.empty,
            self.failed.len(),
            self.statements
        )
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Drives a [`TranscriptProcessor`] over every transcript in a directory
///
/// Files are processed one at a time in file-name order with a fixed pause
/// between consecutive files. A failing file is recorded and skipped.
pub struct BatchOrchestrator<O> {
    processor: TranscriptProcessor<O>,
    filter: PipelineConfig,
    delay: Duration,
}

impl<O> BatchOrchestrator<O>
where
    O: StatementOracle + Sync,
    O::Error: Display,
{
    /// Create an orchestrator using the pipeline's filter and delay
    pub fn new(processor: TranscriptProcessor<O>, config: &PipelineConfig) -> Self {
        Self {
            processor,
            filter: config.clone(),
            delay: config.delay(),
        }
    }

    /// Override the pause between files
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The wrapped processor
    pub fn processor(&self) -> &TranscriptProcessor<O> {
        &self.processor
    }

    /// List transcript files in the directory, sorted by file name
    ///
    /// # Errors
    ///
    /// `SourceDirMissing` when the directory does not exist.
    pub fn discover(&self, source_dir: &Path) -> Result<Vec<PathBuf>, ExtractorError> {
        if !source_dir.is_dir() {
            return Err(ExtractorError::SourceDirMissing(source_dir.to_path_buf()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(source_dir)? {
            let entry = entry?;
            let name = entry.file_name();
            if self.filter.is_transcript(&name.to_string_lossy()) && entry.path().is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Process every transcript in the directory
    pub async fn run(&self, source_dir: &Path) -> Result<BatchReport, ExtractorError> {
        let files = self.discover(source_dir)?;
        let total = files.len();
        info!("Located {} transcript files for processing", total);

        let mut report = BatchReport {
            discovered: total,
            ..BatchReport::default()
        };

        for (i, path) in files.iter().enumerate() {
            info!("Processing file {}/{}", i + 1, total);

            match self.processor.process(path).await {
                Ok(outcome) => {
                    if outcome.statements == 0 {
                        report.empty += 1;
                    } else {
                        report.succeeded += 1;
                    }
                    report.statements += outcome.statements;
                    report.per_file.push((outcome.filename, outcome.statements));
                }
                Err(e) => {
                    let filename = path
                        .file_name()
                        .map(|name| name.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    error!("Error processing {}: {}", filename, e);
                    report.failed.push((filename, e.to_string()));
                }
            }

            if i + 1 < total && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        info!("{}", report.summary());
        Ok(report)
    }
}

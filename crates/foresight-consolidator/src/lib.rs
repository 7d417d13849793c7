//! Foresight Consolidator
//!
//! Folds the statement log (one row per extracted sentence) into one row per
//! company reporting event.
//!
//! Rows are grouped by `(ticker, year, month, day, exchange)` in first-seen
//! order. The first row of a group supplies the metadata; every row then
//! overwrites the metric fields it has a value for, so the last non-empty
//! value wins and empty cells never clear anything.
//!
//! # Examples
//!
//! ```
//! use foresight_consolidator::consolidate;
//! use foresight_domain::{FinancialMetric, TranscriptMetadata};
//! use foresight_store::StatementRow;
//!
//! let meta = TranscriptMetadata { ticker: "AAPL".into(), year: "2024".into(), ..Default::default() };
//! let mut a = StatementRow { metadata: meta.clone(), ..Default::default() };
//! a.values.set(FinancialMetric::GrossMargin, "20%");
//! let mut b = StatementRow { metadata: meta, ..Default::default() };
//! b.values.set(FinancialMetric::Ebitda, "500000");
//!
//! let merged = consolidate(&[a, b]);
//! assert_eq!(merged.len(), 1);
//! assert_eq!(merged[0].values.get(FinancialMetric::GrossMargin), Some("20%"));
//! assert_eq!(merged[0].values.get(FinancialMetric::Ebitda), Some("500000"));
//! ```

#![warn(missing_docs)]

use foresight_domain::{ConsolidationKey, FinancialMetric};
use foresight_store::{
    read_statement_rows, write_consolidated, ConsolidatedRow, StatementRow, StoreError,
};
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Errors that can occur during consolidation
#[derive(Error, Debug)]
pub enum ConsolidatorError {
    /// The statement log does not exist
    #[error("Cannot find input file {}", .0.display())]
    InputMissing(PathBuf),

    /// Reading or writing a CSV failed
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Statistics for one consolidation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConsolidationReport {
    /// Statement rows read
    pub input_rows: usize,
    /// Consolidated rows written
    pub output_rows: usize,
    /// Distinct tickers in the input
    pub unique_tickers: usize,
    /// Metric columns present in the output
    pub metric_columns: usize,
}

impl ConsolidationReport {
    /// One-line summary of the run
    pub fn summary(&self) -> String {
        format!(
            "Records before consolidation: {}, after: {} ({} unique tickers, {} metric columns)",
            self.input_rows, self.output_rows, self.unique_tickers, self.metric_columns
        )
    }
}

impl fmt::Display for ConsolidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

/// Merge statement rows into one row per consolidation key
pub fn consolidate(rows: &[StatementRow]) -> Vec<ConsolidatedRow> {
    let mut positions: HashMap<ConsolidationKey, usize> = HashMap::new();
    let mut merged: Vec<ConsolidatedRow> = Vec::new();

    for row in rows {
        let position = *positions.entry(row.consolidation_key()).or_insert_with(|| {
            merged.push(ConsolidatedRow::new(row.metadata.clone()));
            merged.len() - 1
        });
        merged[position].values.merge_from(&row.values);
    }

    merged
}

/// Reads the statement log and writes the consolidated CSV
#[derive(Debug, Default, Clone, Copy)]
pub struct Consolidator;

impl Consolidator {
    /// Create a consolidator
    pub fn new() -> Self {
        Self
    }

    /// Consolidate `input` into `output`, replacing `output` entirely
    ///
    /// # Errors
    ///
    /// `InputMissing` if `input` does not exist; store errors for undecodable
    /// input or an unwritable output.
    pub fn run(&self, input: &Path, output: &Path) -> Result<ConsolidationReport, ConsolidatorError> {
        if !input.exists() {
            return Err(ConsolidatorError::InputMissing(input.to_path_buf()));
        }

        let rows = read_statement_rows(input)?;
        let unique_tickers = rows
            .iter()
            .map(|row| row.metadata.ticker.as_str())
            .filter(|ticker| !ticker.is_empty())
            .collect::<BTreeSet<_>>()
            .len();
        info!(
            "Read {} statement rows for {} unique tickers from {}",
            rows.len(),
            unique_tickers,
            input.display()
        );

        let merged = consolidate(&rows);
        write_consolidated(output, &merged)?;

        let metric_columns = FinancialMetric::ALL
            .into_iter()
            .filter(|metric| merged.iter().any(|row| row.values.contains(*metric)))
            .count();

        let report = ConsolidationReport {
            input_rows: rows.len(),
            output_rows: merged.len(),
            unique_tickers,
            metric_columns,
        };
        info!("{}; saved to {}", report.summary(), output.display());
        Ok(report)
    }
}

//! Foresight Domain Layer
//!
//! Core vocabulary for turning earnings-call transcripts into forward-looking
//! financial guidance. This crate has no external dependencies: it defines the
//! value objects and trait seams that the infrastructure crates implement.
//!
//! ## Key Concepts
//!
//! - **Metric**: one of 15 fixed US-GAAP-style indicators tracked end to end
//! - **Metadata**: company and reporting date recovered from a transcript's filename
//! - **Forward-looking statement**: one extracted projection about a future period
//! - **Consolidation key**: (ticker, year, month, day, exchange)
//!
//! ## Architecture
//!
//! - No I/O and no external crates
//! - The LLM and the statement oracle are traits; implementations live in
//!   `foresight-llm` and `foresight-extractor`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod metadata;
pub mod metric;
pub mod statement;
pub mod traits;

// Re-exports for convenience
pub use metadata::{ConsolidationKey, TranscriptMetadata};
pub use metric::{FinancialMetric, MetricUnit, MetricValues};
pub use statement::ForwardLookingStatement;

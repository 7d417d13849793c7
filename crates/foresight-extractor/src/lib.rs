//! Foresight Extractor
//!
//! Turns earnings-call transcripts into rows of the statement log.
//!
//! # Architecture
//!
//! ```text
//! data_source/*.txt → BatchOrchestrator → TranscriptProcessor
//!                                           ├─ parse_filename → TranscriptMetadata
//!                                           └─ StatementOracle (Extractor → LLM → Gatekeeper)
//!                                         → StatementLog (append-only CSV)
//! ```
//!
//! # Key Features
//!
//! - **Filename metadata**: `2024-Mar-15-AAPL.NASDAQ-Transcript.txt` → year, month, day, ticker, exchange
//! - **Normalization-contract prompt**: the oracle is told exactly how values must look
//! - **Tolerant reply parsing**: prose around the JSON object is ignored
//! - **Failure isolation**: one bad transcript never aborts the batch
//! - **Rate limiting**: a fixed delay between oracle calls, strictly sequential
//!
//! # Example Usage
//!
//! ```no_run
//! use foresight_extractor::{BatchOrchestrator, Extractor, ExtractorConfig, PipelineConfig, TranscriptProcessor};
//! use foresight_gatekeeper::Gatekeeper;
//! use foresight_llm::{ChatProvider, ChatProviderConfig};
//! use foresight_store::StatementLog;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = ChatProvider::new(ChatProviderConfig::default(), "sk-...")?;
//! let extractor = Extractor::new(llm, Gatekeeper::default_config(), ExtractorConfig::default());
//!
//! let pipeline = PipelineConfig::default();
//! let processor = TranscriptProcessor::new(extractor, StatementLog::new(&pipeline.statements_csv));
//! let report = BatchOrchestrator::new(processor, &pipeline).run(&pipeline.source_dir).await?;
//!
//! println!("{}", report.summary());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod batch;
mod config;
mod error;
mod extractor;
mod filename;
mod parser;
mod processor;
mod prompt;


pub use batch::{BatchOrchestrator, BatchReport};
pub use config::{ExtractorConfig, PipelineConfig};
pub use error::{ExtractorError, ProcessError};
pub use extractor::Extractor;
pub use filename::parse_filename;
pub use parser::parse_oracle_reply;
pub use processor::{ProcessOutcome, TranscriptProcessor, EXTRACTION_DATE_FORMAT};
pub use prompt::PromptBuilder;

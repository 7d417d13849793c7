//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use foresight_extractor::{
    BatchOrchestrator, BatchReport, Extractor, PipelineConfig, TranscriptProcessor,
};
use foresight_gatekeeper::Gatekeeper;
use foresight_llm::ChatProvider;
use foresight_store::StatementLog;
use tracing::info;

/// Execute the extract command.
pub async fn execute_extract(
    args: ExtractArgs,
    config: &Config,
    api_key: &str,
    formatter: &Formatter,
) -> Result<BatchReport> {
    let mut pipeline = config.pipeline.clone();
    if let Some(source) = args.source {
        pipeline.source_dir = source;
    }
    if let Some(output) = args.output {
        pipeline.statements_csv = output;
    }
    if let Some(delay) = args.delay {
        pipeline.delay_secs = delay;
    }

    let report = extract(config, &pipeline, api_key).await?;
    println!("{}", formatter.batch_report(&report));
    Ok(report)
}

/// Run one batch over `pipeline.source_dir`, appending to `pipeline.statements_csv`.
pub(crate) async fn extract(
    config: &Config,
    pipeline: &PipelineConfig,
    api_key: &str,
) -> Result<BatchReport> {
    pipeline
        .validate()
        .map_err(CliError::InvalidInput)?;

    let provider = ChatProvider::new(config.oracle.clone(), api_key)?;
    let extractor = Extractor::new(
        provider,
        Gatekeeper::new(config.validation.clone()),
        config.extraction.clone(),
    );
    let processor = TranscriptProcessor::new(extractor, StatementLog::new(&pipeline.statements_csv));
    let orchestrator = BatchOrchestrator::new(processor, pipeline);

    info!(
        "Extracting from {} into {}",
        pipeline.source_dir.display(),
        pipeline.statements_csv.display()
    );
    Ok(orchestrator.run(&pipeline.source_dir).await?)
}

//! Run command implementation.

use super::consolidate::consolidate;
use super::extract::extract;
use crate::cli::RunArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use foresight_consolidator::ConsolidationReport;
use foresight_extractor::BatchReport;

/// Execute the run command: one extraction batch, then consolidation.
///
/// Consolidation runs even when some transcripts failed, as long as the
/// batch itself completed.
pub async fn execute_run(
    args: RunArgs,
    config: &Config,
    api_key: &str,
    formatter: &Formatter,
) -> Result<(BatchReport, ConsolidationReport)> {
    let mut pipeline = config.pipeline.clone();
    if let Some(source) = args.source {
        pipeline.source_dir = source;
    }
    if let Some(statements) = args.statements {
        pipeline.statements_csv = statements;
    }
    if let Some(consolidated) = args.consolidated {
        pipeline.consolidated_csv = consolidated;
    }
    if let Some(delay) = args.delay {
        pipeline.delay_secs = delay;
    }

    let batch = extract(config, &pipeline, api_key).await?;
    println!("{}", formatter.batch_report(&batch));

    if !pipeline.statements_csv.exists() {
        println!(
            "{}",
            formatter.info("No statements were extracted; nothing to consolidate")
        );
        return Ok((batch, ConsolidationReport::default()));
    }

    let consolidation = consolidate(&pipeline.statements_csv, &pipeline.consolidated_csv, formatter)?;
    Ok((batch, consolidation))
}

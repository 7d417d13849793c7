//! Consolidate command implementation.

use crate::cli::ConsolidateArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use foresight_consolidator::{ConsolidationReport, Consolidator};
use std::path::Path;

/// Execute the consolidate command.
pub fn execute_consolidate(
    args: ConsolidateArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<ConsolidationReport> {
    let input = args.input.unwrap_or_else(|| config.pipeline.statements_csv.clone());
    let output = args.output.unwrap_or_else(|| config.pipeline.consolidated_csv.clone());
    consolidate(&input, &output, formatter)
}

pub(crate) fn consolidate(
    input: &Path,
    output: &Path,
    formatter: &Formatter,
) -> Result<ConsolidationReport> {
    if input == output {
        return Err(CliError::InvalidInput(
            "input and output must be different files".to_string(),
        ));
    }

    let report = Consolidator::new().run(input, output)?;
    println!("{}", formatter.consolidation_report(&report));
    println!(
        "{}",
        formatter.success(&format!("Consolidated data saved to {}", output.display()))
    );
    Ok(report)
}

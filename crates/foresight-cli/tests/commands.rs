//! Command-level tests that need no network access

use foresight_cli::cli::{
    ConsolidateArgs, CredentialsAction, CredentialsArgs, ExtractArgs, RunArgs,
};
use foresight_cli::commands::{
    execute_consolidate, execute_credentials, execute_extract, execute_run,
};
use foresight_cli::{CliError, Config, Formatter};
use foresight_domain::{FinancialMetric, TranscriptMetadata};
use foresight_extractor::ExtractorError;
use foresight_llm::LlmError;
use foresight_store::{StatementLog, StatementRow};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn config_in(dir: &Path) -> Config {
    let mut config = Config::default();
    config.credentials_path = dir.join("config.json");
    config.pipeline.source_dir = dir.join("data_source");
    config.pipeline.statements_csv = dir.join("financial_information.csv");
    config.pipeline.consolidated_csv = dir.join("consolidated_financial_information.csv");
    config.pipeline.delay_secs = 0;
    config
}

fn row(ticker: &str, metric: FinancialMetric, value: &str) -> StatementRow {
    let mut row = StatementRow {
        metadata: TranscriptMetadata {
            year: "2023".into(),
            month: "Mar".into(),
            day: "15".into(),
            ticker: ticker.into(),
            exchange: "NASDAQ".into(),
            filename: format!("2023-Mar-15-{}.NASDAQ-Transcript.txt", ticker),
        },
        financial_category: metric.as_str().to_string(),
        sentence: "We expect it.".into(),
        ..Default::default()
    };
    row.values.set(metric, value);
    row
}

#[tokio::test]
async fn test_extract_empty_directory_makes_no_calls() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    fs::create_dir_all(&config.pipeline.source_dir).unwrap();
    fs::write(config.pipeline.source_dir.join("notes.md"), "ignored").unwrap();

    let args = ExtractArgs { source: None, output: None, delay: None };
    let report = execute_extract(args, &config, "sk-test", &Formatter::new(false))
        .await
        .unwrap();

    assert_eq!(report.discovered, 0);
    assert!(!config.pipeline.statements_csv.exists());
}

#[tokio::test]
async fn test_extract_missing_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let args = ExtractArgs {
        source: Some(dir.path().join("nowhere")),
        output: None,
        delay: None,
    };
    let result = execute_extract(args, &config, "sk-test", &Formatter::new(false)).await;

    assert!(matches!(
        result,
        Err(CliError::Extractor(ExtractorError::SourceDirMissing(_)))
    ));
}

#[tokio::test]
async fn test_extract_rejects_blank_key() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    fs::create_dir_all(&config.pipeline.source_dir).unwrap();

    let args = ExtractArgs { source: None, output: None, delay: None };
    let result = execute_extract(args, &config, "  ", &Formatter::new(false)).await;

    assert!(matches!(result, Err(CliError::Llm(LlmError::MissingApiKey))));
}

#[test]
fn test_consolidate_uses_configured_paths() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    StatementLog::new(&config.pipeline.statements_csv)
        .append(&[
            row("AAPL", FinancialMetric::GrossMargin, "20%"),
            row("AAPL", FinancialMetric::Ebitda, "500000"),
            row("MSFT", FinancialMetric::NetMargin, "35%"),
        ])
        .unwrap();

    let args = ConsolidateArgs { input: None, output: None };
    let report = execute_consolidate(args, &config, &Formatter::new(false)).unwrap();

    assert_eq!(report.input_rows, 3);
    assert_eq!(report.output_rows, 2);
    assert_eq!(report.unique_tickers, 2);

    let written = fs::read_to_string(&config.pipeline.consolidated_csv).unwrap();
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn test_consolidate_refuses_same_input_and_output() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let path = dir.path().join("same.csv");

    let args = ConsolidateArgs {
        input: Some(path.clone()),
        output: Some(path),
    };
    let result = execute_consolidate(args, &config, &Formatter::new(false));
    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

#[test]
fn test_consolidate_missing_input() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let args = ConsolidateArgs { input: None, output: None };
    let result = execute_consolidate(args, &config, &Formatter::new(false));
    assert!(matches!(result, Err(CliError::Consolidator(_))));
}

#[tokio::test]
async fn test_run_with_no_transcripts_skips_consolidation() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    fs::create_dir_all(&config.pipeline.source_dir).unwrap();

    let args = RunArgs {
        source: None,
        statements: None,
        consolidated: None,
        delay: Some(0),
    };
    let (batch, consolidation) = execute_run(args, &config, "sk-test", &Formatter::new(false))
        .await
        .unwrap();

    assert_eq!(batch.discovered, 0);
    assert_eq!(consolidation.output_rows, 0);
    assert!(!config.pipeline.consolidated_csv.exists());
}

#[test]
fn test_credentials_set_then_resolve() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());
    let formatter = Formatter::new(false);

    execute_credentials(
        CredentialsArgs {
            action: CredentialsAction::Set { key: "  sk-new-key-1234 ".into() },
        },
        &config,
        &formatter,
    )
    .unwrap();
    execute_credentials(CredentialsArgs { action: CredentialsAction::Show }, &config, &formatter)
        .unwrap();

    assert_eq!(config.resolve_api_key(None).unwrap(), "sk-new-key-1234");
}

#[test]
fn test_credentials_set_blank_is_rejected() {
    let dir = TempDir::new().unwrap();
    let config = config_in(dir.path());

    let result = execute_credentials(
        CredentialsArgs {
            action: CredentialsAction::Set { key: "   ".into() },
        },
        &config,
        &Formatter::new(false),
    );
    assert!(matches!(result, Err(CliError::Store(_))));
}

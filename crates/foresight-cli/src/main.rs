//! Foresight CLI - Extract forward-looking statements from earnings-call transcripts.

use clap::Parser;
use foresight_cli::commands;
use foresight_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> foresight_cli::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let formatter = Formatter::new(!cli.no_color);

    match cli.command {
        Command::Consolidate(args) => {
            commands::execute_consolidate(args, &config, &formatter)?;
        }
        Command::Credentials(args) => {
            commands::execute_credentials(args, &config, &formatter)?;
        }
        Command::Extract(args) => {
            let api_key = config.resolve_api_key(cli.api_key.as_deref())?;
            commands::execute_extract(args, &config, &api_key, &formatter).await?;
        }
        Command::Run(args) => {
            let api_key = config.resolve_api_key(cli.api_key.as_deref())?;
            commands::execute_run(args, &config, &api_key, &formatter).await?;
        }
    }

    Ok(())
}

//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Foresight - Extract forward-looking financial statements from earnings-call transcripts.
#[derive(Debug, Parser)]
#[command(name = "foresight")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path (default: ~/.foresight/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Oracle API key (overrides the credential file)
    #[arg(long, global = true, env = "FORESIGHT_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract statements from every transcript in the source directory
    Extract(ExtractArgs),

    /// Merge statement rows into one row per reporting event
    Consolidate(ConsolidateArgs),

    /// Extract, then consolidate
    Run(RunArgs),

    /// Manage the stored API key
    Credentials(CredentialsArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Transcript directory
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Statement CSV to append to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Seconds to wait between transcripts
    #[arg(short, long)]
    pub delay: Option<u64>,
}

/// Arguments for the consolidate command.
#[derive(Debug, Parser)]
pub struct ConsolidateArgs {
    /// Statement CSV to read
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Consolidated CSV to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the run command.
#[derive(Debug, Parser)]
pub struct RunArgs {
    /// Transcript directory
    #[arg(short, long)]
    pub source: Option<PathBuf>,

    /// Statement CSV to append to
    #[arg(long)]
    pub statements: Option<PathBuf>,

    /// Consolidated CSV to write
    #[arg(long)]
    pub consolidated: Option<PathBuf>,

    /// Seconds to wait between transcripts
    #[arg(short, long)]
    pub delay: Option<u64>,
}

/// Arguments for the credentials command.
#[derive(Debug, Parser)]
pub struct CredentialsArgs {
    #[command(subcommand)]
    pub action: CredentialsAction,
}

/// Credential actions.
#[derive(Debug, Subcommand)]
pub enum CredentialsAction {
    /// Store a new API key
    Set {
        /// The key
        key: String,
    },

    /// Show the stored key, masked
    Show,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extract_with_overrides() {
        let cli = Cli::try_parse_from([
            "foresight", "extract", "--source", "calls", "--output", "out.csv", "--delay", "0",
        ])
        .unwrap();

        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.source, Some(PathBuf::from("calls")));
                assert_eq!(args.output, Some(PathBuf::from("out.csv")));
                assert_eq!(args.delay, Some(0));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "foresight", "consolidate", "-v", "--no-color", "--config", "f.toml",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(cli.no_color);
        assert_eq!(cli.config, Some(PathBuf::from("f.toml")));
    }

    #[test]
    fn test_credentials_set() {
        let cli = Cli::try_parse_from(["foresight", "credentials", "set", "sk-abc"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Credentials(CredentialsArgs {
                action: CredentialsAction::Set { ref key }
            }) if key == "sk-abc"
        ));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["foresight"]).is_err());
        assert!(Cli::try_parse_from(["foresight", "credentials"]).is_err());
    }
}

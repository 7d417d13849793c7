//! Foresight web server
//!
//! Serves the transcript upload and API-key forms.

use foresight_web::{config::ServerConfig, start_server, WebError};
use std::env;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), WebError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using defaults");
        eprintln!("Usage: foresight-web --config <path-to-config.toml>");
        ServerConfig::default()
    };

    start_server(config).await
}

fn print_help() {
    println!("Foresight Web - Transcript upload and API key forms");
    println!();
    println!("USAGE:");
    println!("    foresight-web --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML file may contain:");
    println!("    - credentials_path: JSON file holding the API key (default: config.json)");
    println!("    - [web] bind_address, bind_port, max_upload_mb (default: 127.0.0.1:5000, 50)");
    println!("    - [pipeline] source_dir: where uploads are saved (default: data_source)");
    println!();
}

//! Configuration file parsing for the web server.
//!
//! Reads the same TOML file as the CLI. Only the `[web]` and `[pipeline]`
//! sections and `credentials_path` are used here.

use foresight_extractor::PipelineConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Web configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Listener settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port
    pub bind_port: u16,

    /// Largest accepted upload request, in megabytes
    pub max_upload_mb: usize,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            bind_port: 5000,
            max_upload_mb: 50,
        }
    }
}

/// Web server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// JSON file holding the oracle API key
    pub credentials_path: PathBuf,

    /// Listener settings
    pub web: WebConfig,

    /// Uploads land in `pipeline.source_dir`
    pub pipeline: PipelineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("config.json"),
            web: WebConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the server depends on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.web.bind_address.trim().is_empty() {
            return Err(ConfigError::Invalid("bind_address must not be empty".to_string()));
        }
        if self.web.max_upload_mb == 0 {
            return Err(ConfigError::Invalid("max_upload_mb must be greater than 0".to_string()));
        }
        if self.credentials_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("credentials_path must not be empty".to_string()));
        }
        self.pipeline.validate().map_err(ConfigError::Invalid)
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.web.bind_address, self.web.bind_port)
    }

    /// Upload limit in bytes
    pub fn max_upload_bytes(&self) -> usize {
        self.web.max_upload_mb * 1024 * 1024
    }
}

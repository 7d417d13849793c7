//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use foresight_extractor::{ExtractorConfig, PipelineConfig};
use foresight_gatekeeper::ValidationConfig;
use foresight_llm::ChatProviderConfig;
use foresight_store::CredentialStore;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// Every section is optional in the file; missing values take their defaults.
/// A `[web]` section, used by the web server, is ignored here.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// JSON file holding the oracle API key
    pub credentials_path: PathBuf,

    /// Chat-completions endpoint settings
    pub oracle: ChatProviderConfig,

    /// Prompt budget and outer timeout
    pub extraction: ExtractorConfig,

    /// Value review switches
    pub validation: ValidationConfig,

    /// Directories, CSV paths and batch pacing
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Default configuration file path (`~/.foresight/config.toml`).
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".foresight").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default path.
    ///
    /// A missing file yields the defaults; a malformed or invalid file is an
    /// error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::default_path()?,
        };

        let config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            toml::from_str(&contents)?
        } else {
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Check every section.
    pub fn validate(&self) -> Result<()> {
        if self.credentials_path.as_os_str().is_empty() {
            return Err(CliError::Config("credentials_path must not be empty".into()));
        }
        self.oracle
            .validate()
            .map_err(|e| CliError::Config(format!("[oracle] {}", e)))?;
        self.extraction
            .validate()
            .map_err(|e| CliError::Config(format!("[extraction] {}", e)))?;
        self.pipeline
            .validate()
            .map_err(|e| CliError::Config(format!("[pipeline] {}", e)))?;
        Ok(())
    }

    /// Credential store at the configured path.
    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(&self.credentials_path)
    }

    /// Pick the API key: command line or environment first, then the
    /// credential file.
    pub fn resolve_api_key(&self, cli_key: Option<&str>) -> Result<String> {
        if let Some(key) = cli_key.map(str::trim).filter(|key| !key.is_empty()) {
            return Ok(key.to_string());
        }
        self.credential_store()
            .load()?
            .ok_or(CliError::MissingApiKey)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            credentials_path: PathBuf::from("config.json"),
            oracle: ChatProviderConfig::default(),
            extraction: ExtractorConfig::default(),
            validation: ValidationConfig::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.credentials_path, PathBuf::from("config.json"));
        assert_eq!(config.pipeline.delay_secs, 5);
        assert_eq!(config.oracle.model, "deepseek-chat");
        assert_eq!(config.extraction.max_text_length, 20000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.pipeline.source_dir, PathBuf::from("data_source"));
    }

    #[test]
    fn test_partial_file_overrides_only_given_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
                credentials_path = "secrets/key.json"

                [oracle]
                model = "deepseek-reasoner"

                [pipeline]
                delay_secs = 2

                [web]
                bind_port = 8000
            "#,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.credentials_path, PathBuf::from("secrets/key.json"));
        assert_eq!(config.oracle.model, "deepseek-reasoner");
        assert_eq!(config.oracle.timeout_secs, 60);
        assert_eq!(config.pipeline.delay_secs, 2);
        assert_eq!(config.pipeline.file_marker, "Transcript");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[pipeline\ndelay_secs = ").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(CliError::Toml(_))));
    }

    #[test]
    fn test_invalid_values_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[oracle]\ntimeout_secs = 0\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(err.to_string().contains("[oracle]"));
    }

    #[test]
    fn test_api_key_resolution_order() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            credentials_path: dir.path().join("config.json"),
            ..Config::default()
        };

        assert!(matches!(config.resolve_api_key(None), Err(CliError::MissingApiKey)));
        assert!(matches!(config.resolve_api_key(Some("  ")), Err(CliError::MissingApiKey)));

        config.credential_store().save("sk-stored").unwrap();
        assert_eq!(config.resolve_api_key(None).unwrap(), "sk-stored");
        assert_eq!(config.resolve_api_key(Some(" sk-flag ")).unwrap(), "sk-flag");
    }
}

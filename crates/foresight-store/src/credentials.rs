//! JSON credential file

use crate::StoreError;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const API_KEY_FIELD: &str = "api_key";

/// Persists the oracle API key as `{"api_key": "..."}`
///
/// Other fields already present in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store backed by the given file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the credential file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored key
    ///
    /// A missing file, an empty file or a blank key all yield `None`.
    pub fn load(&self) -> Result<Option<String>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let value: Value = serde_json::from_str(&content)?;
        let key = value
            .get(API_KEY_FIELD)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        Ok(key)
    }

    /// Store a new key, trimming surrounding whitespace
    ///
    /// The file is written to a sibling temp file and renamed into place.
    pub fn save(&self, api_key: &str) -> Result<(), StoreError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(StoreError::EmptyCredential);
        }

        let mut fields = self.existing_fields();
        fields.insert(API_KEY_FIELD.to_string(), Value::String(api_key.to_string()));
        let content = serde_json::to_string_pretty(&Value::Object(fields))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &self.path)?;

        info!("API key saved to {}", self.path.display());
        Ok(())
    }

    fn existing_fields(&self) -> Map<String, Value> {
        fs::read_to_string(&self.path)
            .ok()
            .and_then(|content| serde_json::from_str::<Value>(&content).ok())
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_none() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path().join("config.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_then_load_trims() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path().join("config.json"));

        store.save("  sk-abc123 \n").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("sk-abc123"));

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"api_key\": \"sk-abc123\""));
        assert!(!dir.path().join("config.json.tmp").exists());
    }

    #[test]
    fn test_blank_key_rejected() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::new(dir.path().join("config.json"));

        assert!(matches!(store.save("   "), Err(StoreError::EmptyCredential)));
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_preserves_other_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_key": "old", "owner": "ops"}"#).unwrap();

        let store = CredentialStore::new(&path);
        store.save("new").unwrap();

        let value: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["api_key"], "new");
        assert_eq!(value["owner"], "ops");
    }

    #[test]
    fn test_blank_stored_key_is_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"api_key": "  "}"#).unwrap();

        assert_eq!(CredentialStore::new(&path).load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(
            CredentialStore::new(&path).load(),
            Err(StoreError::Json(_))
        ));
    }
}

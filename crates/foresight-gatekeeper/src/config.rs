//! Gatekeeper configuration

use serde::{Deserialize, Serialize};

/// Configuration for value review rules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Re-derive non-canonical values from their raw phrase
    pub repair_values: bool,

    /// Remove values that are still non-canonical after repair
    pub drop_unrepairable: bool,

    /// Reject statements whose own category has no value
    pub require_category_value: bool,

    /// Reject statements with a blank sentence
    pub require_sentence: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            repair_values: true,
            drop_unrepairable: true,
            require_category_value: false,
            require_sentence: false,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (repair, but never drop or reject)
    pub fn permissive() -> Self {
        Self {
            repair_values: true,
            drop_unrepairable: false,
            require_category_value: false,
            require_sentence: false,
        }
    }

    /// Create a strict configuration (no repair, all checks enabled)
    pub fn strict() -> Self {
        Self {
            repair_values: false,
            drop_unrepairable: true,
            require_category_value: true,
            require_sentence: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ValidationConfig::default();
        assert!(config.repair_values);
        assert!(config.drop_unrepairable);
        assert!(!config.require_category_value);
    }

    #[test]
    fn test_permissive_config() {
        let config = ValidationConfig::permissive();
        assert!(!config.drop_unrepairable);
        assert!(!config.require_sentence);
    }

    #[test]
    fn test_strict_config() {
        let config = ValidationConfig::strict();
        assert!(!config.repair_values);
        assert!(config.require_category_value);
        assert!(config.require_sentence);
    }
}

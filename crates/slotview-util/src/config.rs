//! Inspection configuration
//!
//! Loaded from the `[inspect]` table of a TOML file:
//!
//! ```toml
//! [inspect]
//! default_filter = "only-enumerable"
//! proxy_with_handler = true
//! preview_limit = 100
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::PropertyFilter;

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error
    #[error("Failed to read config: {0}")]
    IoError(#[from] std::io::Error),

    /// TOML parse error
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),

    /// Semantically invalid setting
    #[error("Invalid config: {0}")]
    ValidationError(String),
}

/// Defaults applied when a binding call omits optional arguments
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UtilConfig {
    /// Filter used when `getOwnNonIndexProperties` gets no filter
    pub default_filter: PropertyFilter,

    /// Whether `getProxyDetails` includes the handler by default
    pub proxy_with_handler: bool,

    /// Maximum number of items in a preview; unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview_limit: Option<usize>,
}

impl Default for UtilConfig {
    fn default() -> Self {
        Self {
            default_filter: PropertyFilter::OnlyEnumerable,
            proxy_with_handler: true,
            preview_limit: None,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    inspect: UtilConfig,
}

impl UtilConfig {
    /// Parse configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text; a missing `[inspect]` table yields defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        file.inspect.validate()?;
        Ok(file.inspect)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview_limit == Some(0) {
            return Err(ConfigError::ValidationError(
                "preview_limit must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Write configuration to a file under an `[inspect]` table
    pub fn to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let file = ConfigFile {
            inspect: self.clone(),
        };
        let content =
            toml::to_string_pretty(&file).map_err(|e| ConfigError::SerializeError(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = UtilConfig::default();
        assert_eq!(config.default_filter, PropertyFilter::OnlyEnumerable);
        assert!(config.proxy_with_handler);
        assert_eq!(config.preview_limit, None);
        assert_eq!(UtilConfig::from_toml_str("").unwrap(), config);
    }

    #[test]
    fn test_parse_inspect_table() {
        let config = UtilConfig::from_toml_str(
            r#"
[inspect]
default_filter = "all-properties"
proxy_with_handler = false
preview_limit = 100
"#,
        )
        .unwrap();

        assert_eq!(config.default_filter, PropertyFilter::AllProperties);
        assert!(!config.proxy_with_handler);
        assert_eq!(config.preview_limit, Some(100));
    }

    #[test]
    fn test_partial_table_keeps_defaults() {
        let config = UtilConfig::from_toml_str("[inspect]\npreview_limit = 5\n").unwrap();
        assert_eq!(config.default_filter, PropertyFilter::OnlyEnumerable);
        assert!(config.proxy_with_handler);
        assert_eq!(config.preview_limit, Some(5));
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = UtilConfig::from_toml_str("[inspect]\ndefault_filter = \"some\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));

        let err = UtilConfig::from_toml_str("[inspect]\npreview_limit = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("slotview.toml");
        let config = UtilConfig {
            default_filter: PropertyFilter::AllProperties,
            proxy_with_handler: false,
            preview_limit: Some(8),
        };

        config.to_file(&path).unwrap();
        assert_eq!(UtilConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = UtilConfig::from_file(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}

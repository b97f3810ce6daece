//! Discovery configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.

use crate::error::DiscoveryError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Durable storage settings
    pub storage: StorageConfig,
    /// Default tracing filter (overridden by `RUST_LOG`)
    pub log_filter: String,
}

impl DiscoveryConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With storage namespace
    #[inline]
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.storage.namespace = namespace.into();
        self
    }

    /// With data directory for the file-backed store
    #[inline]
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage.data_dir = Some(dir.into());
        self
    }

    /// Parse from a TOML document
    ///
    /// # Errors
    /// Returns [`DiscoveryError::Config`] when the document is not valid TOML
    /// or has fields of the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self, DiscoveryError> {
        toml::from_str(text).map_err(|e| DiscoveryError::Config(e.to_string()))
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns [`DiscoveryError::Config`] when the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, DiscoveryError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| DiscoveryError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            storage: StorageConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}

/// Durable storage settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Key prefix for the three discovery keys
    pub namespace: String,
    /// Directory for the file-backed store
    pub data_dir: Option<PathBuf>,
}

impl StorageConfig {
    /// Key holding the serialized record
    #[must_use]
    pub fn data_key(&self) -> String {
        format!("{}.data", self.namespace)
    }

    /// Key holding the current step
    #[must_use]
    pub fn step_key(&self) -> String {
        format!("{}.step", self.namespace)
    }

    /// Key holding the completed-step list
    #[must_use]
    pub fn completed_key(&self) -> String {
        format!("{}.completed", self.namespace)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: "discovery".to_string(),
            data_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config = DiscoveryConfig::from_toml_str("").unwrap();
        assert_eq!(config, DiscoveryConfig::default());
        assert_eq!(config.storage.data_key(), "discovery.data");
    }

    #[test]
    fn partial_document_overrides() {
        let config = DiscoveryConfig::from_toml_str(
            r#"
            log_filter = "debug"

            [storage]
            namespace = "practice"
            data_dir = "/tmp/discovery"
            "#,
        )
        .unwrap();
        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.storage.step_key(), "practice.step");
        assert_eq!(config.storage.data_dir, Some(PathBuf::from("/tmp/discovery")));
    }

    #[test]
    fn wrong_types_are_config_errors() {
        let err = DiscoveryConfig::from_toml_str("log_filter = 3").unwrap_err();
        assert!(matches!(err, DiscoveryError::Config(_)));
        assert!(!err.is_recoverable());
    }
}

//! Diff configuration
//!
//! Loaded from TOML; every field has a default so an empty file is valid.
//!
//! ```toml
//! environment = "production"
//! type_descriptors = false
//!
//! [limits]
//! max_depth = 64
//! max_fields = 100000
//! ```

use crate::errors::{DriftError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bounds applied to every schema tree before it is diffed.
///
/// Scraped documents are untrusted, so recursion depth and total node count
/// are capped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffLimits {
    /// Maximum object nesting depth (root fields are depth 1)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of nodes (objects and terminals) in one tree
    #[serde(default = "default_max_fields")]
    pub max_fields: usize,
}

fn default_max_depth() -> usize {
    64
}

fn default_max_fields() -> usize {
    100_000
}

impl Default for DiffLimits {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_fields: default_max_fields(),
        }
    }
}

/// Top-level configuration shared by the CLI and the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftConfig {
    #[serde(default)]
    pub limits: DiffLimits,

    /// Treat `{"type": "<name>", ...}` objects as typed terminals
    #[serde(default)]
    pub type_descriptors: bool,

    /// Environment label stamped on alert payloads
    #[serde(default = "default_environment")]
    pub environment: String,
}

fn default_environment() -> String {
    "development".to_string()
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            limits: DiffLimits::default(),
            type_descriptors: false,
            environment: default_environment(),
        }
    }
}

impl DriftConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns `DriftError::InvalidConfig` if the TOML is malformed or a limit is zero.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DriftConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    ///
    /// Returns `DriftError::Io` if the file cannot be read, otherwise as
    /// [`DriftConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DriftError::io(path.display().to_string(), e))?;
        Self::from_toml_str(&text)
    }

    /// Check that the limits can admit at least a one-field tree
    ///
    /// # Errors
    ///
    /// Returns `DriftError::InvalidConfig` naming the offending setting.
    pub fn validate(&self) -> Result<()> {
        if self.limits.max_depth == 0 {
            return Err(DriftError::InvalidConfig {
                reason: "limits.max_depth must be at least 1".to_string(),
            });
        }
        if self.limits.max_fields == 0 {
            return Err(DriftError::InvalidConfig {
                reason: "limits.max_fields must be at least 1".to_string(),
            });
        }
        if self.environment.trim().is_empty() {
            return Err(DriftError::InvalidConfig {
                reason: "environment must not be blank".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DriftConfig::from_toml_str("").unwrap();
        assert_eq!(config, DriftConfig::default());
        assert_eq!(config.limits.max_depth, 64);
        assert_eq!(config.limits.max_fields, 100_000);
        assert!(!config.type_descriptors);
    }

    #[test]
    fn test_partial_limits_table() {
        let config = DriftConfig::from_toml_str("[limits]\nmax_depth = 8\n").unwrap();
        assert_eq!(config.limits.max_depth, 8);
        assert_eq!(config.limits.max_fields, 100_000);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let err = DriftConfig::from_toml_str("[limits]\nmax_depth = 0\n").unwrap_err();
        assert!(matches!(err, DriftError::InvalidConfig { .. }));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let err = DriftConfig::from_toml_str("limits = [").unwrap_err();
        assert!(matches!(err, DriftError::InvalidConfig { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apidrift.toml");
        std::fs::write(&path, "environment = \"staging\"\ntype_descriptors = true\n").unwrap();

        let config = DriftConfig::load(&path).unwrap();
        assert_eq!(config.environment, "staging");
        assert!(config.type_descriptors);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = DriftConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, DriftError::Io { .. }));
    }
}

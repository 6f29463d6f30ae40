//! HTTP Server Configuration
//!
//! Host, port and CORS settings plus the diff settings shared with the CLI.
//!
//! ```toml
//! host = "127.0.0.1"
//! port = 8000
//! cors_origins = ["http://localhost:5173"]
//!
//! [drift]
//! environment = "production"
//!
//! [drift.limits]
//! max_depth = 32
//! ```

use apidrift_core::errors::{DriftError, Result};
use apidrift_core::DriftConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// IP address to bind to (default: "0.0.0.0"). Must be an IPv4 or IPv6
    /// literal; hostnames are rejected at startup.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins; empty means any origin. Entries that are not
    /// valid header values are skipped with a warning.
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default)]
    pub drift: DriftConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            drift: DriftConfig::default(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// `DriftError::InvalidConfig` when the TOML is malformed or the drift
    /// settings fail validation.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: HttpServerConfig = toml::from_str(text)?;
        config.drift.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    ///
    /// # Errors
    ///
    /// `DriftError::Io` when the file cannot be read, otherwise as
    /// [`HttpServerConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| DriftError::io(path.display().to_string(), e))?;
        Self::from_toml_str(&text)
    }

    /// Get the socket address string; IPv6 hosts are bracketed
    pub fn socket_addr(&self) -> String {
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

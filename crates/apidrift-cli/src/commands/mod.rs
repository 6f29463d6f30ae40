//! CLI command implementations

pub mod alert;
pub mod diff;
pub mod endpoints;

use apidrift_core::errors::{DriftError, Result};
use apidrift_core::DriftConfig;
use clap::ValueEnum;
use std::path::Path;

/// Output format for diff results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON document
    #[default]
    Json,
    /// Markdown summary for humans
    Summary,
}

pub(crate) fn load_config(path: Option<&Path>) -> Result<DriftConfig> {
    match path {
        Some(path) => DriftConfig::load(path),
        None => Ok(DriftConfig::default()),
    }
}

pub(crate) fn read_bytes(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| DriftError::io(path.display().to_string(), e))
}

pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = read_bytes(path)?;
    serde_json::from_slice(&bytes).map_err(|e| DriftError::InvalidJson {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

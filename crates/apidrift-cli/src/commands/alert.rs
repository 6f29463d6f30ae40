//! Alert payload command
//!
//! Accepts either two schema documents (JSON objects) or two endpoint
//! snapshots (JSON arrays) and prints the payload a notifier would send.

use super::{load_config, read_json};
use apidrift_core::alert::timestamp_from_unix;
use apidrift_core::errors::{DriftError, ExError, ExErrorKind, Result};
use apidrift_core::{
    compare_endpoints, diff_values, dispatch_alert, AlertPayload, AlertSink, EndpointSchema,
};
use chrono::Utc;
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AlertArgs {
    /// Previous schema document or endpoint snapshot
    pub old: PathBuf,

    /// Current schema document or endpoint snapshot
    pub new: PathBuf,

    /// API name stamped on the payload
    #[arg(long)]
    pub api: String,

    /// Scan time as unix seconds (defaults to now)
    #[arg(long)]
    pub timestamp: Option<i64>,

    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Writes payloads to stdout as pretty JSON.
struct StdoutSink;

impl AlertSink for StdoutSink {
    fn deliver(&self, payload: &AlertPayload) -> std::result::Result<(), ExError> {
        let text = serde_json::to_string_pretty(payload).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("deliver_alert")
                .with_message(e.to_string())
        })?;
        println!("{}", text);
        Ok(())
    }
}

fn snapshot(value: Value, path: &std::path::Path) -> Result<Vec<EndpointSchema>> {
    serde_json::from_value(value).map_err(|e| DriftError::InvalidJson {
        origin: path.display().to_string(),
        reason: e.to_string(),
    })
}

pub fn execute(args: AlertArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let timestamp = match args.timestamp {
        Some(secs) => timestamp_from_unix(secs)?,
        None => Utc::now(),
    };

    let old: Value = read_json(&args.old)?;
    let new: Value = read_json(&args.new)?;

    let payload = if old.is_array() && new.is_array() {
        let old = snapshot(old, &args.old)?;
        let new = snapshot(new, &args.new)?;
        let changes = compare_endpoints(&old, &new, &config)?;
        AlertPayload::from_endpoint_changes(&args.api, &changes, timestamp, &config.environment)
    } else {
        let report = diff_values(&old, &new, &config)?;
        AlertPayload::from_report(&args.api, &report, timestamp, &config.environment)
    };

    if !dispatch_alert(&StdoutSink, payload.as_ref())? {
        println!("No changes detected");
    }
    Ok(())
}

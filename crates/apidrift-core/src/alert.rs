//! Alert payloads for schema change notifications.
//!
//! The payload carries only the non-empty sections of a diff, the API it
//! belongs to and when the scan happened. How it is delivered (SNS, email,
//! a webhook) is behind [`AlertSink`].

use crate::diff::{DiffReport, TypeChange};
use crate::endpoints::{EndpointChanges, EndpointRef};
use crate::errors::{ExError, ExErrorKind};
use crate::schema::TypeTag;
use crate::{log_op_end, log_op_error, log_op_start};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Event name stamped on every payload
pub const ALERT_EVENT: &str = "api.schema.updated";

/// Changed sections; empty sections are left out of the serialised form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertChanges {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added_endpoints: Vec<EndpointRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_endpoints: Vec<EndpointRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modified_endpoints: Vec<EndpointRef>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub added: BTreeMap<String, TypeTag>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub removed: BTreeMap<String, TypeTag>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub changed: BTreeMap<String, TypeChange>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertMetadata {
    /// Scan time in unix seconds
    pub scan_timestamp: i64,
    pub total_changes: usize,
}

/// Notification document built from a non-empty diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertPayload {
    pub event: String,
    pub api: String,
    pub timestamp: DateTime<Utc>,
    pub environment: String,
    pub subject: String,
    pub changes: AlertChanges,
    pub metadata: AlertMetadata,
}

impl AlertPayload {
    fn assemble(
        api: &str,
        changes: AlertChanges,
        total_changes: usize,
        timestamp: DateTime<Utc>,
        environment: &str,
    ) -> Self {
        Self {
            event: ALERT_EVENT.to_string(),
            api: api.to_string(),
            timestamp,
            environment: environment.to_string(),
            subject: format!("API Schema Changes Detected: {}", api),
            changes,
            metadata: AlertMetadata {
                scan_timestamp: timestamp.timestamp(),
                total_changes,
            },
        }
    }

    /// Build a payload from a field-level diff; `None` when nothing changed.
    pub fn from_report(
        api: &str,
        report: &DiffReport,
        timestamp: DateTime<Utc>,
        environment: &str,
    ) -> Option<Self> {
        if report.is_empty() {
            return None;
        }
        let changes = AlertChanges {
            added: report.added.clone(),
            removed: report.removed.clone(),
            changed: report.changed.clone(),
            ..AlertChanges::default()
        };
        Some(Self::assemble(
            api,
            changes,
            report.total_changes(),
            timestamp,
            environment,
        ))
    }

    /// Build a payload from an endpoint snapshot comparison; `None` when nothing changed.
    pub fn from_endpoint_changes(
        api: &str,
        endpoint_changes: &EndpointChanges,
        timestamp: DateTime<Utc>,
        environment: &str,
    ) -> Option<Self> {
        if endpoint_changes.is_empty() {
            return None;
        }
        let report = &endpoint_changes.field_changes;
        let changes = AlertChanges {
            added_endpoints: endpoint_changes.added_endpoints.clone(),
            removed_endpoints: endpoint_changes.removed_endpoints.clone(),
            modified_endpoints: endpoint_changes.modified_endpoints.clone(),
            added: report.added.clone(),
            removed: report.removed.clone(),
            changed: report.changed.clone(),
        };
        Some(Self::assemble(
            api,
            changes,
            endpoint_changes.diff_summary.total_changes,
            timestamp,
            environment,
        ))
    }
}

/// Convert a unix timestamp (seconds) into a UTC time.
///
/// # Errors
///
/// `InvalidInput` when the value is outside chrono's representable range.
pub fn timestamp_from_unix(secs: i64) -> Result<DateTime<Utc>, ExError> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| {
        ExError::new(ExErrorKind::InvalidInput)
            .with_op("timestamp_from_unix")
            .with_message(format!("timestamp {} is out of range", secs))
    })
}

/// Delivery seam for alert payloads.
pub trait AlertSink: Send + Sync {
    /// Deliver one payload.
    ///
    /// # Errors
    ///
    /// `NotificationUnavailable` when no transport is configured, or
    /// `ExternalService` when the transport rejects the payload.
    fn deliver(&self, payload: &AlertPayload) -> Result<(), ExError>;
}

/// Emits each payload as a structured log event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn deliver(&self, payload: &AlertPayload) -> Result<(), ExError> {
        let body = serde_json::to_string(payload).map_err(|e| {
            ExError::new(ExErrorKind::Serialization)
                .with_op("deliver_alert")
                .with_message(e.to_string())
        })?;
        tracing::info!(
            api = %payload.api,
            alert_event = %payload.event,
            total_changes = payload.metadata.total_changes,
            payload = %body,
            "{}",
            payload.subject
        );
        Ok(())
    }
}

/// Keeps delivered payloads in memory.
#[derive(Debug, Default)]
pub struct MemoryAlertSink {
    delivered: Mutex<Vec<AlertPayload>>,
}

impl MemoryAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads delivered so far, oldest first
    pub fn delivered(&self) -> Vec<AlertPayload> {
        self.buffer().clone()
    }

    // A push never leaves the buffer half-written, so a poisoned lock still
    // guards a valid list.
    fn buffer(&self) -> MutexGuard<'_, Vec<AlertPayload>> {
        self.delivered
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl AlertSink for MemoryAlertSink {
    fn deliver(&self, payload: &AlertPayload) -> Result<(), ExError> {
        self.buffer().push(payload.clone());
        Ok(())
    }
}

/// Sink used when no transport is configured; every delivery fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAlertSink;

impl AlertSink for NoopAlertSink {
    fn deliver(&self, _: &AlertPayload) -> Result<(), ExError> {
        Err(ExError::new(ExErrorKind::NotificationUnavailable)
            .with_op("deliver_alert")
            .with_message("No alert transport configured"))
    }
}

/// Deliver a payload if there is one.
///
/// Returns `Ok(false)` without touching the sink when `payload` is `None`.
///
/// # Errors
///
/// Whatever the sink reports.
pub fn dispatch_alert(sink: &dyn AlertSink, payload: Option<&AlertPayload>) -> Result<bool, ExError> {
    let Some(payload) = payload else {
        return Ok(false);
    };

    let start = Instant::now();
    log_op_start!("dispatch_alert", api = payload.api.as_str());
    let elapsed = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    match sink.deliver(payload) {
        Ok(()) => {
            log_op_end!(
                "dispatch_alert",
                duration_ms = elapsed(),
                api = payload.api.as_str()
            );
            Ok(true)
        }
        Err(err) => {
            log_op_error!(
                "dispatch_alert",
                err.clone(),
                duration_ms = elapsed(),
                api = payload.api.as_str()
            );
            Err(err)
        }
    }
}

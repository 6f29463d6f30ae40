//! apidrift core - structural diffing of scraped API schemas
//!
//! This crate provides:
//! - A tagged schema model (`SchemaTree`, `SchemaNode`, `TypeTag`)
//! - The schema diff engine (flatten, compare, classify by dotted field path)
//! - Endpoint snapshot comparison for scraped `{path, method, schema}` lists
//! - Alert payloads for downstream notification transports
//! - Markdown summaries for review displays
//! - The structured error and logging facilities shared by the CLI and server

pub mod alert;
pub mod config;
pub mod diff;
pub mod endpoints;
pub mod errors;
pub mod logging_facility;
pub mod schema;

// Re-export commonly used types
pub use alert::{
    dispatch_alert, AlertPayload, AlertSink, LogAlertSink, MemoryAlertSink, NoopAlertSink,
};
pub use config::{DiffLimits, DriftConfig};
pub use diff::{compute_diff, diff_schemas, diff_schemas_with, diff_values, DiffOptions, DiffReport};
pub use endpoints::{compare_endpoints, EndpointChanges, EndpointSchema};
pub use errors::{DriftError, ExError, ExErrorKind, Result, SchemaSide};
pub use schema::{SchemaNode, SchemaTree, TypeTag};

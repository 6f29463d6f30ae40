//! Schema diff engine.
//!
//! Compares two schema trees and reports which dotted field paths were added,
//! removed, or changed type.
//!
//! ## Entry point
//!
//! ```
//! use apidrift_core::config::DriftConfig;
//! use apidrift_core::diff::diff_values;
//! use serde_json::json;
//!
//! let old = json!({"product": {"price": "number"}});
//! let new = json!({"product": {"price": "string"}});
//! let report = diff_values(&old, &new, &DriftConfig::default()).unwrap();
//! assert_eq!(report.changed.len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - **Determinism**: identical inputs produce byte-identical serialised reports.
//! - **Disjointness**: a path appears in at most one of `added`, `removed`, `changed`.
//! - **Shallow arrays**: arrays are opaque terminals; element schemas are not compared.
//! - **Shape transitions**: a terminal that becomes an object is reported as
//!   `removed` at its own path plus `added` for each new leaf below it.

pub mod engine;
pub mod flatten;
pub mod human_summary;
pub mod model;

pub use engine::{compute_diff, diff_flat, diff_schemas, diff_schemas_with, diff_values};
pub use flatten::{flatten, DiffOptions, FlatSchema};
pub use human_summary::{render_endpoint_summary, render_human_summary};
pub use model::{DiffCounts, DiffReport, TypeChange};

//! Schema diff computation.
//!
//! [`diff_schemas`] is the pure core. [`diff_values`] and [`compute_diff`]
//! are the validating boundaries used by the CLI and the server. Each logs
//! one start event and one end or end_error event.

use crate::config::DriftConfig;
use crate::diff::flatten::{flatten, DiffOptions, FlatSchema};
use crate::diff::model::{DiffReport, TypeChange};
use crate::errors::{ExError, SchemaSide};
use crate::schema::SchemaTree;
use crate::{log_op_end, log_op_error, log_op_start};
use serde_json::Value;
use std::time::Instant;

/// Compare two flattened schemas.
pub fn diff_flat(old: &FlatSchema, new: &FlatSchema) -> DiffReport {
    let mut report = DiffReport::default();

    for (path, old_tag) in old {
        match new.get(path) {
            None => {
                report.removed.insert(path.clone(), *old_tag);
            }
            Some(new_tag) if new_tag != old_tag => {
                report.changed.insert(
                    path.clone(),
                    TypeChange {
                        old_type: *old_tag,
                        new_type: *new_tag,
                    },
                );
            }
            Some(_) => {}
        }
    }

    for (path, new_tag) in new {
        if !old.contains_key(path) {
            report.added.insert(path.clone(), *new_tag);
        }
    }

    report
}

/// Diff two schema trees with default options.
pub fn diff_schemas(old: &SchemaTree, new: &SchemaTree) -> DiffReport {
    diff_schemas_with(old, new, &DiffOptions::default())
}

/// Diff two schema trees.
pub fn diff_schemas_with(old: &SchemaTree, new: &SchemaTree, options: &DiffOptions) -> DiffReport {
    diff_flat(&flatten(old, options), &flatten(new, options))
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

fn diff_validated(old: &Value, new: &Value, config: &DriftConfig) -> Result<DiffReport, ExError> {
    let old_tree = SchemaTree::from_value(old, SchemaSide::Old, &config.limits)?;
    let new_tree = SchemaTree::from_value(new, SchemaSide::New, &config.limits)?;
    Ok(diff_schemas_with(
        &old_tree,
        &new_tree,
        &DiffOptions::from(config),
    ))
}

/// Validate two JSON documents and diff them.
///
/// # Errors
///
/// `InvalidSchema` naming the offending side when a root is not an object or
/// a document exceeds `config.limits`.
pub fn diff_values(old: &Value, new: &Value, config: &DriftConfig) -> Result<DiffReport, ExError> {
    let start = Instant::now();
    log_op_start!("diff_values");

    match diff_validated(old, new, config) {
        Ok(report) => {
            log_op_end!(
                "diff_values",
                duration_ms = elapsed_ms(start),
                added = report.added.len(),
                removed = report.removed.len(),
                changed = report.changed.len()
            );
            Ok(report)
        }
        Err(err) => {
            let err = err.with_op("diff_values");
            log_op_error!("diff_values", err.clone(), duration_ms = elapsed_ms(start));
            Err(err)
        }
    }
}

fn parse_document(bytes: &[u8], side: SchemaSide) -> Result<Value, ExError> {
    let text = std::str::from_utf8(bytes).map_err(|e| {
        ExError::invalid_schema(side, format!("{} schema is not valid UTF-8: {}", side, e))
    })?;
    serde_json::from_str(text).map_err(|e| {
        ExError::invalid_schema(side, format!("{} schema is not valid JSON: {}", side, e))
    })
}

/// Parse two raw JSON documents and diff them.
///
/// Byte-identical inputs are validated once and short-circuit to an empty
/// report.
///
/// # Errors
///
/// `InvalidSchema` naming the offending side when the bytes are not UTF-8
/// JSON, or as [`diff_values`].
pub fn compute_diff(
    old_bytes: &[u8],
    new_bytes: &[u8],
    config: &DriftConfig,
) -> Result<DiffReport, ExError> {
    let start = Instant::now();
    log_op_start!("compute_diff");

    match compute_parsed(old_bytes, new_bytes, config) {
        Ok(report) => {
            log_op_end!(
                "compute_diff",
                duration_ms = elapsed_ms(start),
                added = report.added.len(),
                removed = report.removed.len(),
                changed = report.changed.len()
            );
            Ok(report)
        }
        Err(err) => {
            let err = err.with_op("compute_diff");
            log_op_error!("compute_diff", err.clone(), duration_ms = elapsed_ms(start));
            Err(err)
        }
    }
}

fn compute_parsed(
    old_bytes: &[u8],
    new_bytes: &[u8],
    config: &DriftConfig,
) -> Result<DiffReport, ExError> {
    let old = parse_document(old_bytes, SchemaSide::Old)?;

    if old_bytes == new_bytes {
        SchemaTree::from_value(&old, SchemaSide::Old, &config.limits)?;
        return Ok(DiffReport::default());
    }

    let new = parse_document(new_bytes, SchemaSide::New)?;
    diff_validated(&old, &new, config)
}

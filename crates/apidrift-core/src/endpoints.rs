//! Endpoint snapshot comparison.
//!
//! A scraper produces one snapshot per scan: a list of `{path, method, schema}`
//! records. Comparing two snapshots reports endpoints that appeared,
//! disappeared, or whose schema changed, and folds the field-level diff of
//! every modified endpoint into a single [`DiffReport`] keyed
//! `METHOD:path#field`.

use crate::config::DriftConfig;
use crate::diff::{diff_schemas_with, DiffCounts, DiffOptions, DiffReport};
use crate::errors::{ExError, SchemaSide};
use crate::schema::SchemaTree;
use crate::{log_op_end, log_op_error, log_op_start};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

/// One scraped endpoint record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointSchema {
    #[serde(alias = "endpoint")]
    pub path: String,
    pub method: String,
    /// Request/response shape; `null` or absent means no known fields
    #[serde(default)]
    pub schema: Value,
}

impl EndpointSchema {
    pub fn new(path: impl Into<String>, method: impl Into<String>, schema: Value) -> Self {
        Self {
            path: path.into(),
            method: method.into(),
            schema,
        }
    }

    /// Identity of this endpoint within a snapshot
    pub fn key(&self) -> EndpointRef {
        EndpointRef {
            path: self.path.clone(),
            method: self.method.trim().to_uppercase(),
        }
    }
}

/// `(path, METHOD)` identity of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EndpointRef {
    pub path: String,
    pub method: String,
}

impl EndpointRef {
    /// Scope used for this endpoint's paths in `field_changes`.
    ///
    /// `%`, `:` and `#` are percent-encoded in the method and `%` and `#` in
    /// the path, so the scope is unique per endpoint and never contains `#`.
    pub fn field_scope(&self) -> String {
        format!(
            "{}:{}",
            escape_scope_part(&self.method, &[':', '#']),
            escape_scope_part(&self.path, &['#'])
        )
    }
}

fn escape_scope_part(part: &str, reserved: &[char]) -> String {
    let mut out = String::with_capacity(part.len());
    for c in part.chars() {
        if c == '%' || reserved.contains(&c) {
            out.push_str(&format!("%{:02X}", u32::from(c)));
        } else {
            out.push(c);
        }
    }
    out
}

impl std::fmt::Display for EndpointRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Endpoint-level counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

/// Counts across both levels, for notification subjects and dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub endpoint_changes: EndpointCounts,
    pub field_changes: DiffCounts,
    /// Sum of all endpoint and field counts
    pub total_changes: usize,
}

/// Result of comparing two endpoint snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndpointChanges {
    pub added_endpoints: Vec<EndpointRef>,
    pub removed_endpoints: Vec<EndpointRef>,
    pub modified_endpoints: Vec<EndpointRef>,
    pub field_changes: DiffReport,
    pub diff_summary: DiffSummary,
    /// Number of endpoints added, removed, or modified
    pub total_changes: usize,
}

impl EndpointChanges {
    /// True when the two snapshots describe the same endpoints with the same schemas
    pub fn is_empty(&self) -> bool {
        self.total_changes == 0
    }
}

fn index_snapshot<'a>(
    snapshot: &'a [EndpointSchema],
    side: SchemaSide,
) -> BTreeMap<EndpointRef, &'a EndpointSchema> {
    let mut index = BTreeMap::new();
    for endpoint in snapshot {
        if index.insert(endpoint.key(), endpoint).is_some() {
            tracing::warn!(
                side = side.as_str(),
                endpoint = %endpoint.key(),
                "duplicate endpoint in snapshot; last record wins"
            );
        }
    }
    index
}

fn endpoint_tree(
    endpoint: &EndpointSchema,
    side: SchemaSide,
    config: &DriftConfig,
) -> Result<SchemaTree, ExError> {
    match &endpoint.schema {
        Value::Null => Ok(SchemaTree::new()),
        schema => SchemaTree::from_value(schema, side, &config.limits)
            .map_err(|e| e.with_entity_id(endpoint.key().to_string())),
    }
}

fn compare(
    old: &[EndpointSchema],
    new: &[EndpointSchema],
    config: &DriftConfig,
) -> Result<EndpointChanges, ExError> {
    let old_index = index_snapshot(old, SchemaSide::Old);
    let new_index = index_snapshot(new, SchemaSide::New);
    let old_keys: BTreeSet<&EndpointRef> = old_index.keys().collect();
    let new_keys: BTreeSet<&EndpointRef> = new_index.keys().collect();

    let added_endpoints: Vec<EndpointRef> =
        new_keys.difference(&old_keys).map(|k| (*k).clone()).collect();
    let removed_endpoints: Vec<EndpointRef> =
        old_keys.difference(&new_keys).map(|k| (*k).clone()).collect();

    let options = DiffOptions::from(config);
    let mut modified_endpoints = Vec::new();
    let mut field_changes = DiffReport::default();

    for key in old_keys.intersection(&new_keys) {
        let old_endpoint = old_index[*key];
        let new_endpoint = new_index[*key];
        if old_endpoint.schema == new_endpoint.schema {
            continue;
        }
        let old_tree = endpoint_tree(old_endpoint, SchemaSide::Old, config)?;
        let new_tree = endpoint_tree(new_endpoint, SchemaSide::New, config)?;
        let report = diff_schemas_with(&old_tree, &new_tree, &options);
        field_changes.absorb_scoped(&key.field_scope(), report);
        modified_endpoints.push((*key).clone());
    }

    let endpoint_counts = EndpointCounts {
        added: added_endpoints.len(),
        removed: removed_endpoints.len(),
        modified: modified_endpoints.len(),
    };
    let field_counts = field_changes.counts();
    let total_changes = endpoint_counts.added + endpoint_counts.removed + endpoint_counts.modified;

    Ok(EndpointChanges {
        added_endpoints,
        removed_endpoints,
        modified_endpoints,
        field_changes,
        diff_summary: DiffSummary {
            endpoint_changes: endpoint_counts,
            field_changes: field_counts,
            total_changes: total_changes + field_counts.total(),
        },
        total_changes,
    })
}

/// Compare two endpoint snapshots.
///
/// Endpoints are keyed by `(path, METHOD)`; the method is upper-cased so
/// `get` and `GET` are the same endpoint. When a snapshot lists the same key
/// twice the last record wins.
///
/// # Errors
///
/// `InvalidSchema` (with side and endpoint) when a modified endpoint's schema
/// is neither an object nor `null`, or exceeds `config.limits`.
pub fn compare_endpoints(
    old: &[EndpointSchema],
    new: &[EndpointSchema],
    config: &DriftConfig,
) -> Result<EndpointChanges, ExError> {
    let start = Instant::now();
    log_op_start!("compare_endpoints", old_endpoints = old.len(), new_endpoints = new.len());

    let elapsed = || u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    match compare(old, new, config) {
        Ok(changes) => {
            log_op_end!(
                "compare_endpoints",
                duration_ms = elapsed(),
                total_changes = changes.total_changes
            );
            Ok(changes)
        }
        Err(err) => {
            let err = err.with_op("compare_endpoints");
            log_op_error!("compare_endpoints", err.clone(), duration_ms = elapsed());
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_original_field_names_are_accepted() {
        let endpoint: EndpointSchema = serde_json::from_value(json!({
            "endpoint": "/products",
            "method": "get",
            "schema": {"id": "number"}
        }))
        .unwrap();
        assert_eq!(endpoint.path, "/products");
        assert_eq!(endpoint.key().method, "GET");
    }

    #[test]
    fn test_missing_schema_defaults_to_null() {
        let endpoint: EndpointSchema =
            serde_json::from_value(json!({"path": "/health", "method": "GET"})).unwrap();
        assert_eq!(endpoint.schema, Value::Null);
    }

    #[test]
    fn test_field_scope_and_display() {
        let key = EndpointSchema::new("/orders", "post", Value::Null).key();
        assert_eq!(key.field_scope(), "POST:/orders");
        assert_eq!(key.to_string(), "POST /orders");
    }

    #[test]
    fn test_field_scope_escapes_separators() {
        let key = EndpointSchema::new("/docs#intro%20", "get", Value::Null).key();
        assert_eq!(key.field_scope(), "GET:/docs%23intro%2520");

        let odd = EndpointRef {
            path: "/x".into(),
            method: "A:B".into(),
        };
        assert_eq!(odd.field_scope(), "A%3AB:/x");
    }
}

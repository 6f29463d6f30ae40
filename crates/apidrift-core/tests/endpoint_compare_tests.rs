#![allow(clippy::unwrap_used, clippy::expect_used)]

use apidrift_core::diff::render_endpoint_summary;
use apidrift_core::errors::{ExErrorKind, SchemaSide};
use apidrift_core::{compare_endpoints, DriftConfig, EndpointSchema, TypeTag};
use serde_json::{json, Value};

fn snapshot(value: Value) -> Vec<EndpointSchema> {
    serde_json::from_value(value).unwrap()
}

fn baseline() -> Vec<EndpointSchema> {
    snapshot(json!([
        {"path": "/products", "method": "GET", "schema": {"product": {"title": "string", "price": "number"}}},
        {"path": "/orders", "method": "GET", "schema": {"order": {"id": "integer"}}},
        {"path": "/health", "method": "GET"}
    ]))
}

#[test]
fn test_identical_snapshots_have_no_changes() {
    let changes = compare_endpoints(&baseline(), &baseline(), &DriftConfig::default()).unwrap();
    assert!(changes.is_empty());
    assert!(changes.field_changes.is_empty());
    assert_eq!(changes.diff_summary.total_changes, 0);
}

#[test]
fn test_added_removed_and_modified_endpoints() {
    let new = snapshot(json!([
        {"path": "/products", "method": "GET", "schema": {"product": {"title": "string", "price": "string", "tags": "string"}}},
        {"path": "/health", "method": "GET"},
        {"path": "/orders", "method": "POST", "schema": {"order": {"id": "integer"}}}
    ]));

    let changes = compare_endpoints(&baseline(), &new, &DriftConfig::default()).unwrap();

    let added: Vec<String> = changes.added_endpoints.iter().map(|e| e.to_string()).collect();
    let removed: Vec<String> = changes.removed_endpoints.iter().map(|e| e.to_string()).collect();
    let modified: Vec<String> = changes.modified_endpoints.iter().map(|e| e.to_string()).collect();
    assert_eq!(added, vec!["POST /orders"]);
    assert_eq!(removed, vec!["GET /orders"]);
    assert_eq!(modified, vec!["GET /products"]);

    assert_eq!(
        changes.field_changes.added.get("GET:/products#product.tags"),
        Some(&TypeTag::String)
    );
    let price = &changes.field_changes.changed["GET:/products#product.price"];
    assert_eq!(price.old_type, TypeTag::Number);
    assert_eq!(price.new_type, TypeTag::String);

    assert_eq!(changes.total_changes, 3);
    assert_eq!(changes.diff_summary.endpoint_changes.added, 1);
    assert_eq!(changes.diff_summary.field_changes.changed, 1);
    assert_eq!(changes.diff_summary.total_changes, 5);
}

#[test]
fn test_method_case_is_normalised() {
    let new = snapshot(json!([
        {"path": "/products", "method": "get", "schema": {"product": {"title": "string", "price": "number"}}},
        {"path": "/orders", "method": "Get", "schema": {"order": {"id": "integer"}}},
        {"path": "/health", "method": "GET"}
    ]));
    let changes = compare_endpoints(&baseline(), &new, &DriftConfig::default()).unwrap();
    assert!(changes.is_empty());
}

#[test]
fn test_duplicate_endpoint_last_record_wins() {
    let new = snapshot(json!([
        {"path": "/products", "method": "GET", "schema": {"product": {"title": "number"}}},
        {"path": "/products", "method": "GET", "schema": {"product": {"title": "string", "price": "number"}}},
        {"path": "/orders", "method": "GET", "schema": {"order": {"id": "integer"}}},
        {"path": "/health", "method": "GET"}
    ]));
    let changes = compare_endpoints(&baseline(), &new, &DriftConfig::default()).unwrap();
    assert!(changes.is_empty());
}

#[test]
fn test_null_schema_behaves_as_empty_tree() {
    let old = snapshot(json!([{"path": "/health", "method": "GET", "schema": null}]));
    let new = snapshot(json!([{"path": "/health", "method": "GET", "schema": {"status": "string"}}]));

    let changes = compare_endpoints(&old, &new, &DriftConfig::default()).unwrap();
    assert_eq!(changes.modified_endpoints.len(), 1);
    assert_eq!(
        changes.field_changes.added.get("GET:/health#status"),
        Some(&TypeTag::String)
    );
}

#[test]
fn test_field_keys_from_neighbouring_endpoints_do_not_collide() {
    // `/users` + `json.id` and `/users.json` + `id` join to the same dotted text
    let old = snapshot(json!([
        {"path": "/users", "method": "GET", "schema": {}},
        {"path": "/users.json", "method": "GET", "schema": {"id": "string"}}
    ]));
    let new = snapshot(json!([
        {"path": "/users", "method": "GET", "schema": {"json": {"id": "string"}}},
        {"path": "/users.json", "method": "GET", "schema": {}}
    ]));

    let changes = compare_endpoints(&old, &new, &DriftConfig::default()).unwrap();
    let fields = &changes.field_changes;
    assert_eq!(fields.added.get("GET:/users#json.id"), Some(&TypeTag::String));
    assert_eq!(fields.removed.get("GET:/users.json#id"), Some(&TypeTag::String));
    assert!(fields.added.keys().all(|k| !fields.removed.contains_key(k)));
    assert_eq!(changes.diff_summary.field_changes.added, 1);
    assert_eq!(changes.diff_summary.field_changes.removed, 1);
}

#[test]
fn test_field_changes_count_every_endpoint() {
    let old = snapshot(json!([
        {"path": "/users", "method": "GET", "schema": {}},
        {"path": "/users.json", "method": "GET", "schema": {}}
    ]));
    let new = snapshot(json!([
        {"path": "/users", "method": "GET", "schema": {"json": {"id": "string"}}},
        {"path": "/users.json", "method": "GET", "schema": {"id": "string"}}
    ]));

    let changes = compare_endpoints(&old, &new, &DriftConfig::default()).unwrap();
    assert_eq!(changes.field_changes.added.len(), 2);
    assert_eq!(changes.diff_summary.field_changes.added, 2);
    assert_eq!(changes.diff_summary.endpoint_changes.modified, 2);
    assert_eq!(changes.diff_summary.total_changes, 4);
}

#[test]
fn test_invalid_schema_names_side_and_endpoint() {
    let old = snapshot(json!([{"path": "/orders", "method": "GET", "schema": {"id": "integer"}}]));
    let new = snapshot(json!([{"path": "/orders", "method": "GET", "schema": ["id"]}]));

    let err = compare_endpoints(&old, &new, &DriftConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidSchema);
    assert_eq!(err.side(), Some(SchemaSide::New));
    assert_eq!(err.entity_id(), Some("GET /orders"));
    assert_eq!(err.op(), Some("compare_endpoints"));
}

#[test]
fn test_added_endpoint_schema_is_not_validated() {
    // only endpoints present on both sides are diffed field by field
    let new = snapshot(json!([{"path": "/odd", "method": "GET", "schema": "text"}]));
    let changes = compare_endpoints(&[], &new, &DriftConfig::default()).unwrap();
    assert_eq!(changes.added_endpoints.len(), 1);
    assert!(changes.field_changes.is_empty());
}

#[test]
fn test_endpoint_summary_rendering() {
    let changes = compare_endpoints(&baseline(), &[], &DriftConfig::default()).unwrap();
    let summary = render_endpoint_summary(&changes);
    assert!(summary.contains("## Endpoint Diff"));
    assert!(summary.contains("- **Removed** (3):"));
    assert!(summary.contains("`GET /health`"));
}

//! Property tests for the algebra of schema diffs.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use apidrift_core::diff::{flatten, DiffOptions};
use apidrift_core::{diff_schemas, diff_values, DriftConfig, SchemaNode, SchemaTree};
use proptest::prelude::*;
use serde_json::{Map, Value};

fn key() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

fn leaf_node() -> impl Strategy<Value = SchemaNode> {
    prop_oneof![
        Just(SchemaNode::Array),
        Just(SchemaNode::Number),
        Just(SchemaNode::Boolean),
        Just(SchemaNode::Null),
        prop::sample::select(vec!["string", "number", "integer", "boolean", "uuid", "Text"])
            .prop_map(SchemaNode::string),
    ]
}

fn node() -> impl Strategy<Value = SchemaNode> {
    leaf_node().prop_recursive(4, 48, 5, |inner| {
        prop::collection::btree_map(key(), inner, 0..5).prop_map(SchemaNode::Object)
    })
}

fn tree() -> impl Strategy<Value = SchemaTree> {
    prop::collection::btree_map(key(), node(), 0..6).prop_map(SchemaTree::from_fields)
}

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::String),
        Just(Value::Array(Vec::new())),
    ]
}

fn json_object() -> impl Strategy<Value = Value> {
    let value = json_leaf().prop_recursive(4, 48, 5, |inner| {
        prop::collection::btree_map(key(), inner, 0..5)
            .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>()))
    });
    prop::collection::btree_map(key(), value, 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect::<Map<String, Value>>()))
}

proptest! {
    #[test]
    fn prop_identity_diff_is_empty(a in tree()) {
        prop_assert!(diff_schemas(&a, &a).is_empty());
    }

    #[test]
    fn prop_swapping_inputs_inverts_report(a in tree(), b in tree()) {
        prop_assert_eq!(diff_schemas(&a, &b).inverted(), diff_schemas(&b, &a));
    }

    #[test]
    fn prop_sections_are_disjoint(a in tree(), b in tree()) {
        let report = diff_schemas(&a, &b);
        for path in report.added.keys() {
            prop_assert!(!report.removed.contains_key(path));
            prop_assert!(!report.changed.contains_key(path));
        }
        for path in report.removed.keys() {
            prop_assert!(!report.changed.contains_key(path));
        }
    }

    #[test]
    fn prop_report_partitions_flat_paths(a in tree(), b in tree()) {
        let options = DiffOptions::default();
        let old = flatten(&a, &options);
        let new = flatten(&b, &options);
        let report = diff_schemas(&a, &b);

        for (path, tag) in &report.removed {
            prop_assert_eq!(old.get(path), Some(tag));
            prop_assert!(!new.contains_key(path));
        }
        for (path, tag) in &report.added {
            prop_assert_eq!(new.get(path), Some(tag));
            prop_assert!(!old.contains_key(path));
        }
        for (path, change) in &report.changed {
            prop_assert_eq!(old.get(path), Some(&change.old_type));
            prop_assert_eq!(new.get(path), Some(&change.new_type));
            prop_assert_ne!(change.old_type, change.new_type);
        }

        let unchanged = old
            .iter()
            .filter(|(path, tag)| new.get(*path) == Some(*tag))
            .count();
        prop_assert_eq!(old.len(), report.removed.len() + report.changed.len() + unchanged);
    }

    #[test]
    fn prop_json_diff_is_deterministic(a in json_object(), b in json_object()) {
        let config = DriftConfig::default();
        let first = serde_json::to_string(&diff_values(&a, &b, &config).unwrap()).unwrap();
        let second = serde_json::to_string(&diff_values(&a, &b, &config).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_flat_paths_are_terminals(a in tree()) {
        let flat = flatten(&a, &DiffOptions::default());
        // a reported path is never also the parent of another reported path
        for path in flat.keys() {
            let prefix = format!("{}.", path);
            prop_assert!(!flat.keys().any(|other| other.starts_with(&prefix)));
        }
    }
}

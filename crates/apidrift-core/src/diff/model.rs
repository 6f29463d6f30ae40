//! Diff output types.
//!
//! Collections are `BTreeMap`s keyed by dotted path so serialisation order is
//! deterministic.

use crate::schema::TypeTag;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Old and new tags for a path whose type changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeChange {
    pub old_type: TypeTag,
    pub new_type: TypeTag,
}

/// Differences between two schema trees.
///
/// All three sections are always serialised, even when empty, so consumers
/// can rely on the shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Paths present only in the new tree, with their new tag
    #[serde(default)]
    pub added: BTreeMap<String, TypeTag>,
    /// Paths present only in the old tree, with their old tag
    #[serde(default)]
    pub removed: BTreeMap<String, TypeTag>,
    /// Paths present in both trees whose tag differs
    #[serde(default)]
    pub changed: BTreeMap<String, TypeChange>,
}

/// Section sizes of a [`DiffReport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffCounts {
    pub added: usize,
    pub removed: usize,
    pub changed: usize,
}

impl DiffCounts {
    pub fn total(&self) -> usize {
        self.added + self.removed + self.changed
    }
}

impl DiffReport {
    /// True when no differences were found
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    pub fn counts(&self) -> DiffCounts {
        DiffCounts {
            added: self.added.len(),
            removed: self.removed.len(),
            changed: self.changed.len(),
        }
    }

    /// Number of reported paths across all sections
    pub fn total_changes(&self) -> usize {
        self.counts().total()
    }

    /// The report `diff(new, old)` would produce.
    pub fn inverted(&self) -> DiffReport {
        DiffReport {
            added: self.removed.clone(),
            removed: self.added.clone(),
            changed: self
                .changed
                .iter()
                .map(|(path, change)| {
                    (
                        path.clone(),
                        TypeChange {
                            old_type: change.new_type,
                            new_type: change.old_type,
                        },
                    )
                })
                .collect(),
        }
    }

    /// Merge another report into this one, keying each of its paths as
    /// `{scope}#{path}`.
    ///
    /// Used to fold per-endpoint reports into one snapshot-level report.
    /// `scope` must not contain `#` and must be distinct per merged report;
    /// then keys from different reports never collide.
    pub fn absorb_scoped(&mut self, scope: &str, other: DiffReport) {
        let key = |path: String| format!("{}#{}", scope, path);
        self.added
            .extend(other.added.into_iter().map(|(p, t)| (key(p), t)));
        self.removed
            .extend(other.removed.into_iter().map(|(p, t)| (key(p), t)));
        self.changed
            .extend(other.changed.into_iter().map(|(p, c)| (key(p), c)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> DiffReport {
        let mut report = DiffReport::default();
        report.added.insert("a".into(), TypeTag::String);
        report.removed.insert("b".into(), TypeTag::Number);
        report.changed.insert(
            "c".into(),
            TypeChange {
                old_type: TypeTag::Number,
                new_type: TypeTag::String,
            },
        );
        report
    }

    #[test]
    fn test_empty_report_serialises_all_sections() {
        let value = serde_json::to_value(DiffReport::default()).unwrap();
        assert_eq!(value, json!({"added": {}, "removed": {}, "changed": {}}));
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            value,
            json!({
                "added": {"a": "string"},
                "removed": {"b": "number"},
                "changed": {"c": {"old_type": "number", "new_type": "string"}}
            })
        );
    }

    #[test]
    fn test_inverted_swaps_sections() {
        let inverted = sample().inverted();
        assert_eq!(inverted.added.get("b"), Some(&TypeTag::Number));
        assert_eq!(inverted.removed.get("a"), Some(&TypeTag::String));
        assert_eq!(inverted.changed["c"].old_type, TypeTag::String);
        assert_eq!(inverted.inverted(), sample());
    }

    #[test]
    fn test_absorb_scoped() {
        let mut merged = DiffReport::default();
        merged.absorb_scoped("GET:/products", sample());
        assert!(merged.added.contains_key("GET:/products#a"));
        assert!(merged.changed.contains_key("GET:/products#c"));
        assert_eq!(merged.counts().total(), 3);
    }
}

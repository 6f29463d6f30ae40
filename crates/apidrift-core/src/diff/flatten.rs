//! Path flattening.

use crate::config::DriftConfig;
use crate::schema::{SchemaNode, SchemaTree, TypeTag};
use std::collections::BTreeMap;

/// Dotted field path → type tag of the terminal at that path.
pub type FlatSchema = BTreeMap<String, TypeTag>;

/// Knobs that change how a tree is flattened.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Treat `{"type": "<name>", ...}` objects as terminals carrying `<name>`.
    pub type_descriptors: bool,
}

impl From<&DriftConfig> for DiffOptions {
    fn from(config: &DriftConfig) -> Self {
        Self {
            type_descriptors: config.type_descriptors,
        }
    }
}

fn join(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn walk(
    fields: &BTreeMap<String, SchemaNode>,
    prefix: &str,
    options: &DiffOptions,
    out: &mut FlatSchema,
) {
    for (key, node) in fields {
        let path = join(prefix, key);
        match node {
            SchemaNode::Object(children) => {
                match node.descriptor_tag().filter(|_| options.type_descriptors) {
                    Some(tag) => {
                        out.entry(path).or_insert(tag);
                    }
                    None => walk(children, &path, options, out),
                }
            }
            leaf => {
                out.entry(path).or_insert_with(|| leaf.type_tag());
            }
        }
    }
}

/// Flatten a tree into its terminal paths.
///
/// Objects contribute no entry of their own, only their leaves do, so an
/// empty nested object disappears from the result. Keys are joined verbatim;
/// if two distinct positions spell the same dotted path (a key containing
/// `.`), the one visited first in key order is kept.
pub fn flatten(tree: &SchemaTree, options: &DiffOptions) -> FlatSchema {
    let mut out = FlatSchema::new();
    walk(tree.fields(), "", options, &mut out);
    out
}

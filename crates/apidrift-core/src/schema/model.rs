//! Schema tree types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Coarse classification of a terminal's shape.
///
/// Serialised in lowercase (`"string"`, `"number"`, ...) so diff reports match
/// the wire format consumed by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Object,
    Array,
    String,
    Number,
    Boolean,
    Null,
}

impl TypeTag {
    /// All tags, in declaration order
    pub const ALL: [TypeTag; 6] = [
        TypeTag::Object,
        TypeTag::Array,
        TypeTag::String,
        TypeTag::Number,
        TypeTag::Boolean,
        TypeTag::Null,
    ];

    /// Lowercase wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Object => "object",
            TypeTag::Array => "array",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Null => "null",
        }
    }

    /// Resolve a declared type name as written in scraped schemas.
    ///
    /// Matching is case-sensitive. `integer` folds into `number`.
    pub fn from_type_name(name: &str) -> Option<TypeTag> {
        match name {
            "object" => Some(TypeTag::Object),
            "array" => Some(TypeTag::Array),
            "string" => Some(TypeTag::String),
            "number" | "integer" => Some(TypeTag::Number),
            "boolean" => Some(TypeTag::Boolean),
            "null" => Some(TypeTag::Null),
            _ => None,
        }
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One node of a schema tree.
///
/// Arrays are opaque: element schemas are not kept because the engine never
/// compares them. Strings keep their literal so declared type names
/// (`"number"`, `"boolean"`, ...) can be honoured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaNode {
    Object(BTreeMap<String, SchemaNode>),
    Array,
    String(String),
    Number,
    Boolean,
    Null,
}

impl SchemaNode {
    /// Type tag of this node when it is treated as a terminal.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            SchemaNode::Object(_) => TypeTag::Object,
            SchemaNode::Array => TypeTag::Array,
            SchemaNode::String(literal) => {
                TypeTag::from_type_name(literal).unwrap_or(TypeTag::String)
            }
            SchemaNode::Number => TypeTag::Number,
            SchemaNode::Boolean => TypeTag::Boolean,
            SchemaNode::Null => TypeTag::Null,
        }
    }

    /// Declared tag of an OpenAPI-style descriptor object (`{"type": "string", ...}`).
    ///
    /// `None` for non-objects and for objects whose `type` is absent, not a
    /// string, or not a known type name.
    pub fn descriptor_tag(&self) -> Option<TypeTag> {
        match self {
            SchemaNode::Object(fields) => match fields.get("type") {
                Some(SchemaNode::String(name)) => TypeTag::from_type_name(name),
                _ => None,
            },
            _ => None,
        }
    }

    /// Convenience constructor for a string leaf.
    pub fn string(literal: impl Into<String>) -> Self {
        SchemaNode::String(literal.into())
    }
}

/// A whole schema document. The root is a mapping by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaTree {
    fields: BTreeMap<String, SchemaNode>,
}

impl SchemaTree {
    /// An empty tree (`{}`)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a tree from already-typed root fields
    pub fn from_fields(fields: BTreeMap<String, SchemaNode>) -> Self {
        Self { fields }
    }

    /// Add or replace a root field
    pub fn with_field(mut self, key: impl Into<String>, node: SchemaNode) -> Self {
        self.fields.insert(key.into(), node);
        self
    }

    /// Root fields in key order
    pub fn fields(&self) -> &BTreeMap<String, SchemaNode> {
        &self.fields
    }

    /// True for `{}`
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

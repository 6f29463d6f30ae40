//! Conversion from untyped JSON into [`SchemaTree`].
//!
//! This is the only place that inspects raw documents, so it is where the
//! root-shape check and the depth/size limits are enforced.

use crate::config::DiffLimits;
use crate::errors::{ExError, SchemaSide};
use crate::schema::model::{SchemaNode, SchemaTree};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Human-readable name of a JSON value's kind, for error messages.
fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Object(_) => "object",
        Value::Array(_) => "array",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "boolean",
        Value::Null => "null",
    }
}

struct Converter<'a> {
    side: SchemaSide,
    limits: &'a DiffLimits,
    nodes: usize,
}

impl Converter<'_> {
    fn convert_object(
        &mut self,
        map: &Map<String, Value>,
        prefix: &str,
        depth: usize,
    ) -> Result<BTreeMap<String, SchemaNode>, ExError> {
        let mut fields = BTreeMap::new();
        for (key, value) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            let node = self.convert(value, &path, depth)?;
            fields.insert(key.clone(), node);
        }
        Ok(fields)
    }

    fn convert(&mut self, value: &Value, path: &str, depth: usize) -> Result<SchemaNode, ExError> {
        self.nodes += 1;
        if self.nodes > self.limits.max_fields {
            return Err(ExError::invalid_schema(
                self.side,
                format!(
                    "schema has more than {} nodes",
                    self.limits.max_fields
                ),
            )
            .with_field_path(path));
        }
        if depth > self.limits.max_depth {
            return Err(ExError::invalid_schema(
                self.side,
                format!("schema nesting exceeds maximum depth {}", self.limits.max_depth),
            )
            .with_field_path(path));
        }

        Ok(match value {
            Value::Object(map) => SchemaNode::Object(self.convert_object(map, path, depth + 1)?),
            Value::Array(_) => SchemaNode::Array,
            Value::String(s) => SchemaNode::String(s.clone()),
            Value::Number(_) => SchemaNode::Number,
            Value::Bool(_) => SchemaNode::Boolean,
            Value::Null => SchemaNode::Null,
        })
    }
}

impl SchemaTree {
    /// Validate and convert a JSON document into a schema tree.
    ///
    /// # Errors
    ///
    /// `InvalidSchema` (tagged with `side`) when the root is not an object,
    /// when nesting exceeds `limits.max_depth`, or when the document has more
    /// than `limits.max_fields` nodes.
    pub fn from_value(value: &Value, side: SchemaSide, limits: &DiffLimits) -> Result<Self, ExError> {
        let map = value.as_object().ok_or_else(|| {
            ExError::invalid_schema(
                side,
                format!(
                    "{} schema root must be an object, got {}",
                    side,
                    json_kind(value)
                ),
            )
            .with_op("parse_schema")
        })?;

        let mut converter = Converter {
            side,
            limits,
            nodes: 0,
        };
        let fields = converter
            .convert_object(map, "", 1)
            .map_err(|e| e.with_op("parse_schema"))?;
        Ok(SchemaTree::from_fields(fields))
    }
}

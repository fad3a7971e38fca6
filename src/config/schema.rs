//! Recursive required-shape validation for configuration trees.
//!
//! A schema declares which keys must be present and what shape each must
//! have. Validation walks keys in declaration order and stops at the first
//! violation, logging it at error severity. Keys present in the tree but not
//! declared in the schema are allowed.

use serde_json::Value;
use tracing::error;

/// Expected primitive type of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Bool,
    Int,
    /// Any number. An integer is acceptable where a float is expected; the
    /// reverse is not.
    Float,
    Str,
}

impl Kind {
    fn matches(self, value: &Value) -> bool {
        match self {
            Kind::Bool => value.is_boolean(),
            Kind::Int => value.is_i64() || value.is_u64(),
            Kind::Float => value.is_number(),
            Kind::Str => value.is_string(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Kind::Bool => "boolean",
            Kind::Int => "integer",
            Kind::Float => "float",
            Kind::Str => "string",
        }
    }
}

/// A node in the schema: a primitive leaf or a nested mapping.
#[derive(Debug, Clone)]
pub enum SchemaNode {
    Primitive(Kind),
    Map(Schema),
}

/// An ordered set of required keys. Declaration order is the order violations
/// are reported in, so it is kept as a list rather than a map.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<(String, SchemaNode)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a primitive-typed key.
    pub fn key(mut self, name: impl Into<String>, kind: Kind) -> Self {
        self.entries.push((name.into(), SchemaNode::Primitive(kind)));
        self
    }

    /// Require a nested mapping validated against its own schema.
    pub fn map(mut self, name: impl Into<String>, nested: Schema) -> Self {
        self.entries.push((name.into(), SchemaNode::Map(nested)));
        self
    }

    pub fn entries(&self) -> &[(String, SchemaNode)] {
        &self.entries
    }
}

/// Validate a tree against a schema.
///
/// Returns `false` for the first missing key, wrong container kind, or wrong
/// primitive type, after logging the offending key. Never mutates the tree.
pub fn validate(tree: &Value, schema: &Schema) -> bool {
    validate_at(tree, schema, "")
}

fn validate_at(tree: &Value, schema: &Schema, prefix: &str) -> bool {
    let Some(map) = tree.as_object() else {
        error!(key = prefix, "expected a mapping during validation");
        return false;
    };

    for (key, node) in schema.entries() {
        let full_key = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };

        let Some(value) = map.get(key) else {
            error!(key = %full_key, "missing required configuration key");
            return false;
        };

        match node {
            SchemaNode::Map(nested) => {
                if !value.is_object() {
                    error!(key = %full_key, "configuration key should be a mapping");
                    return false;
                }
                if !validate_at(value, nested, &full_key) {
                    return false;
                }
            }
            SchemaNode::Primitive(kind) => {
                if !kind.matches(value) {
                    error!(
                        key = %full_key,
                        expected = kind.name(),
                        "configuration key has wrong type"
                    );
                    return false;
                }
            }
        }
    }

    true
}

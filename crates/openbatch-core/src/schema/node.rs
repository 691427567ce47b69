//! Structural classification of schema nodes.
//!
//! JSON Schema carries no discriminant tag: what a node *is* follows from
//! which keys it happens to carry.  [`classify`] probes those keys once and
//! returns a [`NodeKind`], so the rewrite in this crate can dispatch on a
//! plain `match` instead of scattering key checks through the recursion.

use serde_json::{Map, Value};

/// The structural shape of a single schema node.
///
/// Exactly one kind applies per node, decided in declaration order: a node
/// carrying `$ref` is a [`NodeKind::Ref`] even if it also carries
/// `properties`, an object wins over `items`, `anyOf` wins over `allOf`.
/// Nodes matching no shape at all are [`NodeKind::Leaf`] and pass through the
/// rewrite untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Carries a `$ref` key.
    Ref,
    /// Declares `type: "object"` or carries a `properties` key.
    Object,
    /// Declares `type: "array"` or carries an `items` key.
    Array,
    /// Carries an `anyOf` branch list.
    AnyOf,
    /// Carries an `allOf` branch list.
    AllOf,
    /// Anything else: scalar types, enums, bare annotations, ...
    Leaf,
}

/// Decide which [`NodeKind`] applies to `schema`.
pub fn classify(schema: &Map<String, Value>) -> NodeKind {
    if schema.contains_key("$ref") {
        NodeKind::Ref
    } else if declares_type(schema, "object") || schema.contains_key("properties") {
        NodeKind::Object
    } else if declares_type(schema, "array") || schema.contains_key("items") {
        NodeKind::Array
    } else if schema.contains_key("anyOf") {
        NodeKind::AnyOf
    } else if schema.contains_key("allOf") {
        NodeKind::AllOf
    } else {
        NodeKind::Leaf
    }
}

fn declares_type(schema: &Map<String, Value>, expected: &str) -> bool {
    schema.get("type").and_then(Value::as_str) == Some(expected)
}

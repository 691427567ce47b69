//! Rewrite of arbitrary schema documents into the strict dialect.
//!
//! Strict structured-output mode only accepts a restricted JSON Schema
//! subset: every object must list **all** of its properties as `required`
//! and must reject unknown keys with `additionalProperties: false`.  The
//! documents produced by general-purpose generators satisfy neither rule, so
//! [`normalize`] walks the whole tree and rewrites it:
//!
//! | Node shape | Rewrite |
//! |------------|---------|
//! | object | close the object, require every property, recurse into each |
//! | array | recurse into `items` |
//! | `anyOf` / `allOf` | recurse into each branch, order and length kept |
//! | bare `$ref` | left alone; its target is rewritten where it lives |
//! | `$ref` with siblings | inlined, sibling keys win, then rewritten |
//! | `definitions` / `$defs` | every named entry rewritten like a document |
//! | anything else | copied verbatim |
//!
//! The rewrite is a pure function: the input tree is never mutated, and
//! running it on its own output returns an identical document.  `allOf`
//! branches are *not* merged into one effective object; callers that need
//! merged intersections must flatten them before handing the document over.

use serde_json::{Map, Value};

use crate::error::SchemaError;

use super::node::{classify, NodeKind};
use super::resolve::resolve_ref;

/// Containers whose values are themselves schema documents, keyed by name.
const DEFINITION_KEYS: [&str; 2] = ["definitions", "$defs"];

/// Rewrite `node` into the strict schema dialect.
///
/// `path` is the position of `node` inside `root` and feeds nothing but
/// diagnostic messages; pass `""` when `node` is the document root.  `root`
/// is the resolution base for every `$ref` in the subtree, no matter how
/// deeply nested, and is threaded through unchanged.
///
/// ```rust
/// use serde_json::json;
///
/// let document = json!({
///     "type": "object",
///     "properties": { "name": { "type": "string" } }
/// });
/// let strict = openbatch_core::schema::normalize(&document, "", &document).unwrap();
///
/// assert_eq!(strict["required"], json!(["name"]));
/// assert_eq!(strict["additionalProperties"], json!(false));
/// ```
///
/// # Errors
///
/// * [`SchemaError::MalformedReference`] – an inlined `$ref` is not a local
///   `#/` pointer.
/// * [`SchemaError::ReferenceNotFound`] – an inlined `$ref` does not lead to
///   a schema object.
/// * [`SchemaError::CyclicReference`] – a chain of `$ref` nodes with sibling
///   keys loops back into itself.
pub fn normalize(node: &Value, path: &str, root: &Value) -> Result<Value, SchemaError> {
    let mut expanding = Vec::new();
    normalize_node(node, path, root, &mut expanding)
}

/// Recursive worker behind [`normalize`].
///
/// `expanding` tracks the references currently being inlined, so a chain
/// that loops back into itself is reported instead of recursing forever.
fn normalize_node(
    node: &Value,
    path: &str,
    root: &Value,
    expanding: &mut Vec<String>,
) -> Result<Value, SchemaError> {
    let Value::Object(schema) = node else {
        // Scalars and plain JSON arrays carry no schema structure.
        return Ok(node.clone());
    };

    let mut out = schema.clone();

    // Definition containers hold full schema documents at any nesting level.
    // They are rewritten against the same document root because `$ref`
    // strings inside them still address the whole document.
    for container in DEFINITION_KEYS {
        if let Some(Value::Object(definitions)) = schema.get(container) {
            let mut rebuilt = Map::new();
            for (name, definition) in definitions {
                let value = normalize_node(
                    definition,
                    &format!("{path}/{container}/{name}"),
                    root,
                    expanding,
                )?;
                rebuilt.insert(name.clone(), value);
            }
            out.insert(container.to_string(), Value::Object(rebuilt));
        }
    }

    match classify(schema) {
        NodeKind::Ref => normalize_ref(schema, out, path, root, expanding),
        NodeKind::Object => {
            let mut required = Vec::new();
            if let Some(Value::Object(properties)) = schema.get("properties") {
                let mut rebuilt = Map::new();
                for (key, property) in properties {
                    required.push(Value::String(key.clone()));
                    let value = normalize_node(
                        property,
                        &format!("{path}/properties/{key}"),
                        root,
                        expanding,
                    )?;
                    rebuilt.insert(key.clone(), value);
                }
                out.insert("properties".to_string(), Value::Object(rebuilt));
            }
            // The strict dialect knows no optional fields: whatever
            // `properties` lists is exactly what `required` lists.
            out.insert("required".to_string(), Value::Array(required));
            if !schema.contains_key("additionalProperties") {
                out.insert("additionalProperties".to_string(), Value::Bool(false));
            }
            Ok(Value::Object(out))
        }
        NodeKind::Array => {
            // Tuple-form `items` lists pass through untouched; only the
            // single-schema form is rewritten.
            if let Some(items) = schema.get("items").filter(|items| items.is_object()) {
                let value = normalize_node(items, &format!("{path}/items"), root, expanding)?;
                out.insert("items".to_string(), value);
            }
            Ok(Value::Object(out))
        }
        NodeKind::AnyOf => {
            if let Some(branches) = normalize_branches(schema, "anyOf", path, root, expanding)? {
                out.insert("anyOf".to_string(), branches);
            }
            Ok(Value::Object(out))
        }
        NodeKind::AllOf => {
            if let Some(branches) = normalize_branches(schema, "allOf", path, root, expanding)? {
                out.insert("allOf".to_string(), branches);
            }
            Ok(Value::Object(out))
        }
        NodeKind::Leaf => Ok(Value::Object(out)),
    }
}

/// Rewrite every element of an `anyOf` / `allOf` branch list independently.
///
/// Branch count and order are preserved; branches are never merged into one
/// another.  Returns `None` when the keyword is absent or not a list, in
/// which case the caller leaves the original value alone.
fn normalize_branches(
    schema: &Map<String, Value>,
    keyword: &str,
    path: &str,
    root: &Value,
    expanding: &mut Vec<String>,
) -> Result<Option<Value>, SchemaError> {
    let Some(Value::Array(branches)) = schema.get(keyword) else {
        return Ok(None);
    };

    let mut rebuilt = Vec::with_capacity(branches.len());
    for (index, branch) in branches.iter().enumerate() {
        rebuilt.push(normalize_node(
            branch,
            &format!("{path}/{keyword}/{index}"),
            root,
            expanding,
        )?);
    }
    Ok(Some(Value::Array(rebuilt)))
}

/// Handle a node carrying `$ref`.
///
/// A bare reference stays a reference: its target sits somewhere inside
/// `root` and is rewritten at its own tree position, so the definition
/// rather than the reference site ends up carrying the strict annotations.
///
/// Sibling keys beside `$ref` have no meaning under standard JSON Schema
/// semantics, so such a node is *unrolled*: the target is inlined, sibling
/// keys win on conflict, `$ref` is dropped and the merged node is rewritten
/// in place.  Note that the node's own `$ref` shadows any `$ref` inside the
/// target, so unrolling never chases a chain of references.
fn normalize_ref(
    schema: &Map<String, Value>,
    out: Map<String, Value>,
    path: &str,
    root: &Value,
    expanding: &mut Vec<String>,
) -> Result<Value, SchemaError> {
    let Some(ref_value) = schema.get("$ref") else {
        // classify() only reports Ref when the key is present.
        return Ok(Value::Object(out));
    };

    if schema.len() == 1 {
        return Ok(Value::Object(out));
    }

    let Some(reference) = ref_value.as_str() else {
        return Err(SchemaError::MalformedReference {
            reference: ref_value.to_string(),
        });
    };

    if expanding.iter().any(|seen| seen == reference) {
        return Err(SchemaError::CyclicReference {
            reference: reference.to_string(),
            path: path.to_string(),
        });
    }

    let resolved = resolve_ref(root, reference)?;
    let Value::Object(target) = resolved else {
        return Err(SchemaError::ReferenceNotFound {
            reference: reference.to_string(),
            segment: last_segment(reference).to_string(),
        });
    };

    let mut merged = target.clone();
    for (key, value) in out {
        merged.insert(key, value);
    }
    merged.remove("$ref");

    expanding.push(reference.to_string());
    let result = normalize_node(&Value::Object(merged), path, root, expanding);
    expanding.pop();
    result
}

fn last_segment(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn strict(document: &Value) -> Value {
        normalize(document, "", document).expect("document should normalize")
    }

    #[test]
    fn scalars_and_plain_arrays_pass_through() {
        assert_eq!(strict(&json!("text")), json!("text"));
        assert_eq!(strict(&json!(42)), json!(42));
        assert_eq!(strict(&json!([1, 2, 3])), json!([1, 2, 3]));
    }

    #[test]
    fn leaves_are_copied_verbatim() {
        let leaf = json!({ "type": "string", "description": "a name", "minLength": 1 });
        assert_eq!(strict(&leaf), leaf);
    }

    #[test]
    fn objects_are_closed_and_fully_required() {
        let document = json!({
            "type": "object",
            "properties": {
                "age": { "type": "integer" },
                "name": { "type": "string" }
            }
        });
        assert_eq!(
            strict(&document),
            json!({
                "type": "object",
                "properties": {
                    "age": { "type": "integer" },
                    "name": { "type": "string" }
                },
                "required": ["age", "name"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn properties_alone_make_an_object() {
        let document = json!({ "properties": { "a": { "type": "string" } } });
        let result = strict(&document);
        assert_eq!(result["required"], json!(["a"]));
        assert_eq!(result["additionalProperties"], json!(false));
    }

    #[test]
    fn explicit_additional_properties_is_preserved() {
        let open = json!({ "type": "object", "properties": {}, "additionalProperties": true });
        assert_eq!(strict(&open)["additionalProperties"], json!(true));

        let constrained = json!({
            "type": "object",
            "additionalProperties": { "type": "string" }
        });
        assert_eq!(
            strict(&constrained)["additionalProperties"],
            json!({ "type": "string" })
        );
    }

    #[test]
    fn stale_required_lists_are_replaced() {
        let document = json!({
            "type": "object",
            "properties": {
                "a": { "type": "string" },
                "b": { "type": "string" }
            },
            "required": ["a"]
        });
        assert_eq!(strict(&document)["required"], json!(["a", "b"]));
    }

    #[test]
    fn propertyless_objects_are_still_closed() {
        assert_eq!(
            strict(&json!({ "type": "object" })),
            json!({ "type": "object", "required": [], "additionalProperties": false })
        );
    }

    #[test]
    fn array_items_are_rewritten() {
        let document = json!({
            "type": "array",
            "items": {
                "type": "object",
                "properties": { "id": { "type": "integer" } }
            }
        });
        let items = &strict(&document)["items"];
        assert_eq!(items["required"], json!(["id"]));
        assert_eq!(items["additionalProperties"], json!(false));
    }

    #[test]
    fn tuple_form_items_are_left_alone() {
        let document = json!({
            "type": "array",
            "items": [{ "type": "string" }, { "type": "integer" }]
        });
        assert_eq!(
            strict(&document)["items"],
            json!([{ "type": "string" }, { "type": "integer" }])
        );
    }

    #[test]
    fn any_of_branches_are_rewritten_independently() {
        let document = json!({
            "anyOf": [
                { "type": "string" },
                { "type": "object", "properties": { "a": { "type": "string" } } }
            ]
        });
        let branches = &strict(&document)["anyOf"];
        assert_eq!(branches[0], json!({ "type": "string" }));
        assert_eq!(branches[1]["required"], json!(["a"]));
        assert_eq!(branches[1]["additionalProperties"], json!(false));
    }

    #[test]
    fn all_of_branches_keep_their_count() {
        let document = json!({
            "allOf": [
                { "type": "object", "properties": { "a": { "type": "string" } } },
                { "type": "object", "properties": { "b": { "type": "string" } } }
            ]
        });
        let branches = strict(&document)["allOf"].as_array().unwrap().clone();
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0]["required"], json!(["a"]));
        assert_eq!(branches[1]["required"], json!(["b"]));
    }

    #[test]
    fn single_branch_all_of_is_not_collapsed() {
        let document = json!({
            "allOf": [{ "type": "object", "properties": { "a": { "type": "string" } } }]
        });
        let result = strict(&document);
        assert_eq!(result["allOf"].as_array().unwrap().len(), 1);
        assert!(result.get("properties").is_none());
    }

    #[test]
    fn bare_references_stay_references() {
        let document = json!({
            "type": "object",
            "properties": {
                "user": { "$ref": "#/definitions/User" }
            },
            "definitions": {
                "User": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } }
                }
            }
        });
        let result = strict(&document);
        assert_eq!(
            result["properties"]["user"],
            json!({ "$ref": "#/definitions/User" })
        );
        // The annotations land on the definition instead.
        assert_eq!(result["definitions"]["User"]["required"], json!(["name"]));
        assert_eq!(
            result["definitions"]["User"]["additionalProperties"],
            json!(false)
        );
    }

    #[test]
    fn references_with_siblings_are_unrolled() {
        let root = json!({
            "definitions": {
                "User": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } }
                }
            }
        });
        let node = json!({ "$ref": "#/definitions/User", "description": "the user" });

        let result = normalize(&node, "", &root).unwrap();
        assert_eq!(
            result,
            json!({
                "type": "object",
                "description": "the user",
                "properties": { "name": { "type": "string" } },
                "required": ["name"],
                "additionalProperties": false
            })
        );
    }

    #[test]
    fn sibling_keys_win_over_the_target() {
        let root = json!({
            "definitions": {
                "User": { "type": "object", "description": "from the definition" }
            }
        });
        let node = json!({ "$ref": "#/definitions/User", "description": "local note" });
        assert_eq!(
            normalize(&node, "", &root).unwrap()["description"],
            json!("local note")
        );
    }

    #[test]
    fn unrolling_does_not_chase_reference_chains() {
        // The node's own `$ref` shadows the one inside the target and both
        // are dropped, so a chained target contributes only its other keys.
        let root = json!({
            "definitions": {
                "Alias": { "$ref": "#/definitions/Real", "title": "alias" },
                "Real": { "type": "object" }
            }
        });
        let node = json!({ "$ref": "#/definitions/Alias", "description": "d" });
        assert_eq!(
            normalize(&node, "", &root).unwrap(),
            json!({ "title": "alias", "description": "d" })
        );
    }

    #[test]
    fn nested_defs_are_normalized_by_a_single_call() {
        let document = json!({
            "type": "object",
            "properties": {
                "address": { "$ref": "#/$defs/Address" }
            },
            "$defs": {
                "Address": {
                    "type": "object",
                    "properties": {
                        "street": { "type": "string" },
                        "zip": { "type": "string" }
                    }
                }
            }
        });
        let address = &strict(&document)["$defs"]["Address"];
        assert_eq!(address["required"], json!(["street", "zip"]));
        assert_eq!(address["additionalProperties"], json!(false));
    }

    #[test]
    fn both_definition_containers_are_processed() {
        let document = json!({
            "definitions": { "A": { "type": "object" } },
            "$defs": { "B": { "type": "object" } }
        });
        let result = strict(&document);
        assert_eq!(result["definitions"]["A"]["additionalProperties"], json!(false));
        assert_eq!(result["$defs"]["B"]["additionalProperties"], json!(false));
    }

    #[test]
    fn defs_resolve_against_the_whole_document() {
        // A sibling-carrying reference inside one definition must resolve
        // against the document root, not against the definition itself.
        let document = json!({
            "$defs": {
                "Outer": {
                    "type": "object",
                    "properties": {
                        "inner": { "$ref": "#/$defs/Inner", "description": "nested" }
                    }
                },
                "Inner": {
                    "type": "object",
                    "properties": { "value": { "type": "integer" } }
                }
            }
        });
        let inner = &strict(&document)["$defs"]["Outer"]["properties"]["inner"];
        assert_eq!(inner["description"], json!("nested"));
        assert_eq!(inner["required"], json!(["value"]));
        assert!(inner.get("$ref").is_none());
    }

    #[test]
    fn normalization_is_idempotent() {
        let document = json!({
            "type": "object",
            "properties": {
                "id": { "type": "integer" },
                "tags": { "type": "array", "items": { "type": "string" } },
                "owner": { "$ref": "#/$defs/User" },
                "note": {
                    "anyOf": [
                        { "type": "string" },
                        { "type": "null" }
                    ]
                },
                "annotated": { "$ref": "#/$defs/User", "description": "inline" }
            },
            "$defs": {
                "User": {
                    "type": "object",
                    "properties": { "name": { "type": "string" } }
                }
            }
        });
        let once = strict(&document);
        let twice = normalize(&once, "", &once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn same_reference_in_sibling_positions_is_not_a_cycle() {
        let document = json!({
            "type": "object",
            "properties": {
                "first": { "$ref": "#/$defs/User", "description": "first" },
                "second": { "$ref": "#/$defs/User", "description": "second" }
            },
            "$defs": {
                "User": { "type": "object", "properties": { "name": { "type": "string" } } }
            }
        });
        let result = strict(&document);
        assert_eq!(result["properties"]["first"]["description"], json!("first"));
        assert_eq!(result["properties"]["second"]["required"], json!(["name"]));
    }

    #[test]
    fn cyclic_sibling_references_are_rejected() {
        let document = json!({
            "definitions": {
                "Node": {
                    "type": "object",
                    "properties": {
                        "next": { "$ref": "#/definitions/Node", "description": "successor" }
                    }
                }
            }
        });
        let err = normalize(&document, "", &document).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::CyclicReference { ref reference, .. }
                if reference == "#/definitions/Node"
        ));
    }

    #[test]
    fn malformed_references_propagate_from_unrolling() {
        let node = json!({ "$ref": "definitions/User", "description": "broken" });
        let err = normalize(&node, "", &json!({})).unwrap_err();
        assert_eq!(
            err,
            SchemaError::MalformedReference {
                reference: "definitions/User".to_string(),
            }
        );
    }

    #[test]
    fn missing_targets_propagate_from_unrolling() {
        let root = json!({ "definitions": {} });
        let node = json!({ "$ref": "#/definitions/Ghost", "description": "gone" });
        let err = normalize(&node, "", &root).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ReferenceNotFound {
                reference: "#/definitions/Ghost".to_string(),
                segment: "Ghost".to_string(),
            }
        );
    }

    #[test]
    fn scalar_targets_cannot_be_unrolled() {
        let root = json!({ "definitions": { "Title": "just a string" } });
        let node = json!({ "$ref": "#/definitions/Title", "description": "nope" });
        let err = normalize(&node, "", &root).unwrap_err();
        assert_eq!(
            err,
            SchemaError::ReferenceNotFound {
                reference: "#/definitions/Title".to_string(),
                segment: "Title".to_string(),
            }
        );
    }

    #[test]
    fn non_structural_keys_survive_the_rewrite() {
        let document = json!({
            "type": "object",
            "title": "Payload",
            "description": "outer",
            "properties": { "when": { "type": "string", "format": "date-time" } }
        });
        let result = strict(&document);
        assert_eq!(result["title"], json!("Payload"));
        assert_eq!(result["description"], json!("outer"));
        assert_eq!(result["properties"]["when"]["format"], json!("date-time"));
    }
}

//! Integration tests for schema derivation and the strict rewrite.

use openbatch_core::schema::{derive_strict_schema, normalize, SchemaFormat};
use schemars::JsonSchema;
use serde_json::{json, Value};

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Address {
    street: String,
    city: String,
    zip: String,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct LineItem {
    sku: String,
    quantity: u32,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
enum Status {
    Draft,
    Submitted,
    Paid,
}

#[derive(JsonSchema)]
#[allow(dead_code)]
struct Invoice {
    id: String,
    status: Status,
    items: Vec<LineItem>,
    shipping: Option<Address>,
    note: Option<String>,
}

/// Walk the whole document and assert the strict-dialect rules on every
/// object schema encountered, no matter how deeply nested.
fn assert_strict_everywhere(node: &Value, at: &str) {
    match node {
        Value::Object(map) => {
            let is_object_schema = map.get("type").and_then(Value::as_str) == Some("object")
                || map.get("properties").is_some_and(Value::is_object);
            if is_object_schema {
                assert!(
                    map.contains_key("additionalProperties"),
                    "object at `{at}` is not closed"
                );
                let required: Vec<&str> = map["required"]
                    .as_array()
                    .unwrap_or_else(|| panic!("object at `{at}` has no required list"))
                    .iter()
                    .filter_map(Value::as_str)
                    .collect();
                if let Some(Value::Object(properties)) = map.get("properties") {
                    let keys: Vec<&str> = properties.keys().map(String::as_str).collect();
                    assert_eq!(required, keys, "required mismatch at `{at}`");
                }
            }
            for (key, value) in map {
                assert_strict_everywhere(value, &format!("{at}/{key}"));
            }
        }
        Value::Array(values) => {
            for (index, value) in values.iter().enumerate() {
                assert_strict_everywhere(value, &format!("{at}/{index}"));
            }
        }
        _ => {}
    }
}

// === Derived documents ===

mod derived {
    use super::*;

    #[test]
    fn every_object_in_a_derived_document_is_strict() {
        let schema = derive_strict_schema::<Invoice>().unwrap();
        assert_strict_everywhere(&schema, "");
    }

    #[test]
    fn optional_struct_fields_become_nullable_branches() {
        let schema = derive_strict_schema::<Invoice>().unwrap();

        // `shipping` stays listed under required; nullability lives in the
        // schema itself, not in the required list.
        let required = schema["required"].as_array().unwrap();
        assert!(required.contains(&json!("shipping")));

        let branches = schema["properties"]["shipping"]["anyOf"]
            .as_array()
            .unwrap();
        assert_eq!(branches.len(), 2);
        assert_eq!(branches[0], json!({ "$ref": "#/definitions/Address" }));
        assert_eq!(branches[1]["type"], json!("null"));
    }

    #[test]
    fn referenced_definitions_are_closed() {
        let schema = derive_strict_schema::<Invoice>().unwrap();

        let line_item = &schema["definitions"]["LineItem"];
        assert_eq!(line_item["required"], json!(["quantity", "sku"]));
        assert_eq!(line_item["additionalProperties"], json!(false));

        // The reference site itself stays a bare pointer.
        assert_eq!(
            schema["properties"]["items"]["items"],
            json!({ "$ref": "#/definitions/LineItem" })
        );
    }

    #[test]
    fn unit_enums_stay_plain_enum_leaves() {
        let schema = derive_strict_schema::<Invoice>().unwrap();
        let status = &schema["definitions"]["Status"];

        assert_eq!(status["enum"], json!(["Draft", "Submitted", "Paid"]));
        assert!(status.get("additionalProperties").is_none());
    }

    #[test]
    fn rewriting_a_derived_document_again_changes_nothing() {
        let once = derive_strict_schema::<Invoice>().unwrap();
        let twice = normalize(&once, "", &once).unwrap();
        assert_eq!(once, twice);
    }
}

// === Wire descriptor ===

mod descriptor {
    use super::*;

    #[test]
    fn for_type_produces_a_complete_descriptor() {
        let format = SchemaFormat::for_type::<Invoice>().unwrap();

        assert_eq!(format.name, "Invoice");
        assert!(format.strict);
        assert_strict_everywhere(&format.schema, "");
    }

    #[test]
    fn descriptor_serializes_with_the_expected_keys() {
        let format = SchemaFormat::for_type::<LineItem>().unwrap();
        let wire = serde_json::to_value(&format).unwrap();

        assert_eq!(wire["type"], json!("json_schema"));
        assert_eq!(wire["name"], json!("LineItem"));
        assert_eq!(wire["strict"], json!(true));
        assert!(wire["schema"].is_object());
    }
}

// === Hand-written documents ===

mod handwritten {
    use super::*;

    #[test]
    fn unrolled_references_survive_a_full_document_pass() {
        let document = json!({
            "type": "object",
            "properties": {
                "primary": { "$ref": "#/$defs/Contact", "description": "main contact" },
                "backup": { "$ref": "#/$defs/Contact" }
            },
            "$defs": {
                "Contact": {
                    "type": "object",
                    "properties": { "email": { "type": "string" } }
                }
            }
        });
        let result = normalize(&document, "", &document).unwrap();

        // Annotated reference: inlined and rewritten.
        let primary = &result["properties"]["primary"];
        assert!(primary.get("$ref").is_none());
        assert_eq!(primary["description"], json!("main contact"));
        assert_eq!(primary["required"], json!(["email"]));

        // Bare reference: untouched, its target carries the annotations.
        assert_eq!(
            result["properties"]["backup"],
            json!({ "$ref": "#/$defs/Contact" })
        );
        assert_strict_everywhere(&result["$defs"]["Contact"], "/$defs/Contact");
    }
}

//! Derivation and strict-mode normalization of JSON Schema documents.
//!
//! Structured batch outputs hinge on one pipeline: describe the expected
//! response as a Rust type, derive a schema for it, rewrite that schema into
//! the strict dialect the API enforces, and ship the result under a named
//! descriptor.  Each stage is usable on its own:
//!
//! | Stage | Entry point |
//! |-------|-------------|
//! | derive + rewrite | [`derive_strict_schema`] |
//! | rewrite an existing document | [`normalize`] |
//! | wrap for the wire | [`SchemaFormat`] |
//!
//! Hand-written documents go straight through [`normalize`]; documents
//! derived from types take the one-stop [`SchemaFormat::for_type`].

mod format;
mod node;
mod resolve;
mod strict;

pub use format::*;
pub use node::*;
pub use resolve::*;
pub use strict::*;

use schemars::{r#gen::SchemaSettings, JsonSchema, SchemaGenerator};
use serde_json::Value;

use crate::error::Result;

/// Derive a JSON Schema for `T` and rewrite it into the strict dialect.
///
/// The schema is generated against draft-07 with subschemas kept under
/// `definitions`.  References survive generation untouched; the rewrite pass
/// normalizes every definition in place, so referenced and inline schemas
/// end up equally strict.
///
/// # Errors
///
/// Fails when the generated document contains a reference the rewriter
/// cannot process, or when the generated schema cannot be represented as a
/// JSON value.
///
/// # Example
///
/// ```
/// use openbatch_core::schema::derive_strict_schema;
/// use schemars::JsonSchema;
///
/// #[derive(JsonSchema)]
/// struct Foo { bar: String }
///
/// let schema = derive_strict_schema::<Foo>().unwrap();
/// assert_eq!(schema["required"], serde_json::json!(["bar"]));
/// assert_eq!(schema["additionalProperties"], serde_json::json!(false));
/// ```
pub fn derive_strict_schema<T>() -> Result<Value>
where
    T: JsonSchema,
{
    let settings = SchemaSettings::draft07();
    let generator = SchemaGenerator::new(settings);
    let root = generator.into_root_schema_for::<T>();

    let document = serde_json::to_value(root)?;
    Ok(normalize(&document, "", &document)?)
}

//! The wire descriptor that attaches a strict schema to a request.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

use super::derive_strict_schema;

/// A named, strict output schema in the shape the API expects.
///
/// The same descriptor is carried by both response surfaces; only the key it
/// hangs from differs between them.  Construct one through
/// [`SchemaFormat::for_type`] to have the schema derived and rewritten in one
/// step, or through [`SchemaFormat::new`] when the document comes from
/// elsewhere.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SchemaFormat {
    #[serde(rename = "type")]
    pub r#type: SchemaFormatType,
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

/// Discriminator for [`SchemaFormat`].  Only one variant exists today.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SchemaFormatType {
    JsonSchema,
}

impl SchemaFormat {
    /// Wrap an already-normalized schema document.
    ///
    /// The document is taken as-is; no rewriting happens here.  `strict` is
    /// always set.
    pub fn new(name: impl Into<String>, schema: Value) -> Self {
        Self {
            r#type: SchemaFormatType::JsonSchema,
            name: name.into(),
            schema,
            strict: true,
        }
    }

    /// Derive the schema for `T` and rewrite it into the strict dialect.
    ///
    /// The descriptor is named after `T`'s schema name, which is what the
    /// model echoes back in its response.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::OpenBatchError::Schema`] when the derived
    /// document contains a reference the rewriter cannot process, and
    /// [`crate::error::OpenBatchError::Serialization`] when the generated
    /// schema cannot be represented as a JSON value.
    pub fn for_type<T: JsonSchema>() -> Result<Self> {
        Ok(Self::new(T::schema_name(), derive_strict_schema::<T>()?))
    }
}

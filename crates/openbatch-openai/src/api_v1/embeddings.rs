use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use openbatch_types::input::EmbeddingInput;

use crate::impl_builder_methods;

/// Request body for `/v1/embeddings`.
///
/// Embeddings carry neither messages nor an output schema, so none of the
/// structured-output surface of the generation requests appears here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmbeddingsRequest {
    pub model: String,

    /// Text(s) to embed; usually injected per record by the bulk helpers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<EmbeddingInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding_format: Option<EncodingFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Pass-through for parameters this struct does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl EmbeddingsRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: None,
            dimensions: None,
            encoding_format: None,
            user: None,
            extra: Default::default(),
        }
    }
}

impl_builder_methods!(
    EmbeddingsRequest,
    input: EmbeddingInput,
    dimensions: i64,
    encoding_format: EncodingFormat,
    user: String
);

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum EncodingFormat {
    Float,
    Base64,
}

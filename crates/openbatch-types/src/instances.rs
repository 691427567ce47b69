//! Per-record inputs for bulk batch helpers.
//!
//! A batch job pairs one *common request* (model, sampling options, output
//! schema) with many *instances*, each contributing the handful of values
//! that differ per record: a `custom_id`, the record's own input, and
//! optionally a few body fields to override just for that record.
//!
//! Three instance shapes exist, one per input style:
//!
//! | Type | Carries |
//! |------|---------|
//! | [`TemplateInstance`] | placeholder values for a prompt template |
//! | [`MessagesInstance`] | a fully spelled-out conversation |
//! | [`EmbeddingInstance`] | the text(s) to embed |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use openbatch_core::message::Message;

use crate::input::EmbeddingInput;

/// Placeholder values for one templated request.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct TemplateInstance {
    /// Identifier echoed back next to this record's result.
    pub id: String,
    /// Values substituted into the template's `{name}` placeholders.
    pub variables: HashMap<String, String>,
    /// Body fields overriding the common request for this record only.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub request_options: Map<String, Value>,
}

impl TemplateInstance {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            variables: HashMap::new(),
            request_options: Map::new(),
        }
    }

    /// Set one placeholder value.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    /// Replace the whole variable map at once.
    pub fn variables(mut self, variables: HashMap<String, String>) -> Self {
        self.variables = variables;
        self
    }

    /// Override one body field for this record only.
    pub fn request_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request_options.insert(key.into(), value.into());
        self
    }
}

/// A fully spelled-out conversation for one request.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct MessagesInstance {
    pub id: String,
    /// The conversation sent for this record, in order.
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub request_options: Map<String, Value>,
}

impl MessagesInstance {
    pub fn new(id: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            id: id.into(),
            messages,
            request_options: Map::new(),
        }
    }

    pub fn request_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request_options.insert(key.into(), value.into());
        self
    }
}

/// The text(s) one embedding request should embed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmbeddingInstance {
    pub id: String,
    pub input: EmbeddingInput,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub request_options: Map<String, Value>,
}

impl EmbeddingInstance {
    pub fn new(id: impl Into<String>, input: impl Into<EmbeddingInput>) -> Self {
        Self {
            id: id.into(),
            input: input.into(),
            request_options: Map::new(),
        }
    }

    pub fn request_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request_options.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn template_instance_collects_variables_fluently() {
        let instance = TemplateInstance::new("row-1")
            .variable("city", "Paris")
            .variable("tone", "formal")
            .request_option("temperature", 0.0);

        assert_eq!(instance.id, "row-1");
        assert_eq!(instance.variables["city"], "Paris");
        assert_eq!(instance.request_options["temperature"], json!(0.0));
    }

    #[test]
    fn empty_request_options_are_not_serialized() {
        let instance = TemplateInstance::new("row-1").variable("city", "Paris");
        let wire = serde_json::to_value(&instance).unwrap();
        assert!(wire.get("request_options").is_none());
    }

    #[test]
    fn embedding_instance_accepts_both_input_shapes() {
        let single = EmbeddingInstance::new("a", "some text");
        assert_eq!(single.input, EmbeddingInput::Single("some text".to_string()));

        let batch = EmbeddingInstance::new("b", vec!["one", "two"]);
        assert_eq!(
            batch.input,
            EmbeddingInput::Batch(vec!["one".to_string(), "two".to_string()])
        );
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use openbatch_core::message::Message;
use openbatch_core::schema::SchemaFormat;
use openbatch_prompt::reusable::ReusablePrompt;

use crate::impl_builder_methods;

use super::common::{ReasoningConfig, ServiceTier};

/// Request body for `/v1/responses`.
///
/// Every optional field is skipped when unset, so a freshly constructed
/// request serializes to just `{"model": ...}` and grows only with what the
/// caller sets.  Parameters the API gains before this struct does can be
/// smuggled in through `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResponsesRequest {
    pub model: String,

    /// Free-form text or a chat-style message list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<ResponsesInput>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation: Option<String>,
    /// Extra output blocks to include, e.g. `"message.output_text.logprobs"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tool_calls: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_response_id: Option<String>,
    /// Server-side prompt reference; mutually exclusive with `input` in
    /// practice, though the API tolerates both.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<ReusablePrompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_cache_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<ReasoningConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_tier: Option<ServiceTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    /// Structured-output configuration; the strict schema descriptor lives
    /// under `text.format`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truncation: Option<Truncation>,

    /// Pass-through for parameters this struct does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ResponsesRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            input: None,
            conversation: None,
            include: None,
            instructions: None,
            max_output_tokens: None,
            max_tool_calls: None,
            parallel_tool_calls: None,
            previous_response_id: None,
            prompt: None,
            prompt_cache_key: None,
            reasoning: None,
            safety_identifier: None,
            service_tier: None,
            store: None,
            temperature: None,
            text: None,
            tool_choice: None,
            tools: None,
            top_logprobs: None,
            top_p: None,
            truncation: None,
            extra: Default::default(),
        }
    }

    /// Set a plain text input.
    pub fn input_text(mut self, text: impl Into<String>) -> Self {
        self.input = Some(ResponsesInput::Text(text.into()));
        self
    }

    /// Set a chat-style message list as input.
    pub fn input_messages(mut self, messages: Vec<Message>) -> Self {
        self.input = Some(ResponsesInput::Messages(messages));
        self
    }
}

impl_builder_methods!(
    ResponsesRequest,
    input: ResponsesInput,
    conversation: String,
    include: Vec<String>,
    instructions: String,
    max_output_tokens: i64,
    max_tool_calls: i64,
    parallel_tool_calls: bool,
    previous_response_id: String,
    prompt: ReusablePrompt,
    prompt_cache_key: String,
    reasoning: ReasoningConfig,
    safety_identifier: String,
    service_tier: ServiceTier,
    store: bool,
    temperature: f64,
    text: TextConfig,
    tool_choice: Value,
    tools: Vec<Value>,
    top_logprobs: i64,
    top_p: f64,
    truncation: Truncation
);

/// Input accepted by the Responses endpoint: a bare string or a message
/// list, serialized untagged so the wire carries whichever was set.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum ResponsesInput {
    Text(String),
    Messages(Vec<Message>),
}

/// Structured-output carrier for the Responses endpoint.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TextConfig {
    pub format: SchemaFormat,
}

impl From<SchemaFormat> for TextConfig {
    fn from(format: SchemaFormat) -> Self {
        Self { format }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Truncation {
    Auto,
    Disabled,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn fresh_requests_serialize_to_model_only() {
        let request = ResponsesRequest::new("gpt-4.1");
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "model": "gpt-4.1" })
        );
    }

    #[test]
    fn text_input_serializes_as_a_string() {
        let request = ResponsesRequest::new("gpt-4.1").input_text("Say hello");
        assert_eq!(
            serde_json::to_value(&request).unwrap()["input"],
            json!("Say hello")
        );
    }

    #[test]
    fn message_input_serializes_as_role_content_pairs() {
        let request = ResponsesRequest::new("gpt-4.1")
            .input_messages(vec![Message::user("What is the capital of France?")]);
        assert_eq!(
            serde_json::to_value(&request).unwrap()["input"],
            json!([{ "role": "user", "content": "What is the capital of France?" }])
        );
    }

    #[test]
    fn schema_descriptor_lands_under_text_format() {
        let format = SchemaFormat::new("capital", json!({ "type": "object" }));
        let request = ResponsesRequest::new("gpt-4.1").text(format.into());

        assert_eq!(
            serde_json::to_value(&request).unwrap()["text"],
            json!({
                "format": {
                    "type": "json_schema",
                    "name": "capital",
                    "schema": { "type": "object" },
                    "strict": true
                }
            })
        );
    }

    #[test]
    fn extra_fields_are_flattened_into_the_body() {
        let mut request = ResponsesRequest::new("gpt-4.1");
        request
            .extra
            .insert("background".to_string(), json!(true));
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "model": "gpt-4.1", "background": true })
        );
    }
}

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use openbatch_core::message::Message;
use openbatch_core::schema::SchemaFormat;

use crate::impl_builder_methods;

use super::common::{ReasoningEffort, ServiceTier};

/// Request body for `/v1/chat/completions`.
///
/// `messages` starts empty so a base request can be declared once and filled
/// per record; the serialized body omits the key until messages are set.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ChatCompletionsRequest {
    pub model: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logit_bias: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logprobs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_completion_tokens: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modalities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_tool_calls: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prediction: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning_effort: Option<ReasoningEffort>,
    /// Structured-output carrier for this endpoint; see [`ResponseFormat`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_tier: Option<ServiceTier>,
    /// Up to four stop sequences, as a single string or an array.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_choice: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_logprobs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbosity: Option<Verbosity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_search_options: Option<Value>,

    /// Pass-through for parameters this struct does not model yet.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ChatCompletionsRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            frequency_penalty: None,
            logit_bias: None,
            logprobs: None,
            max_completion_tokens: None,
            metadata: None,
            modalities: None,
            n: None,
            parallel_tool_calls: None,
            prediction: None,
            presence_penalty: None,
            reasoning_effort: None,
            response_format: None,
            service_tier: None,
            stop: None,
            store: None,
            temperature: None,
            tool_choice: None,
            tools: None,
            top_logprobs: None,
            top_p: None,
            verbosity: None,
            web_search_options: None,
            extra: Default::default(),
        }
    }

    /// Set the conversation for this request.
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }
}

impl_builder_methods!(
    ChatCompletionsRequest,
    frequency_penalty: f64,
    logit_bias: Map<String, Value>,
    logprobs: bool,
    max_completion_tokens: i64,
    metadata: BTreeMap<String, String>,
    modalities: Vec<String>,
    n: i64,
    parallel_tool_calls: bool,
    prediction: Value,
    presence_penalty: f64,
    reasoning_effort: ReasoningEffort,
    response_format: ResponseFormat,
    service_tier: ServiceTier,
    stop: Value,
    store: bool,
    temperature: f64,
    tool_choice: Value,
    tools: Vec<Value>,
    top_logprobs: i64,
    top_p: f64,
    verbosity: Verbosity,
    web_search_options: Value
);

/// Structured-output carrier for Chat Completions.
///
/// The descriptor payload is the same one Responses ships under
/// `text.format`; this endpoint nests it under a `json_schema` key next to a
/// `type` tag instead.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ResponseFormat {
    pub r#type: ResponseFormatType,
    pub json_schema: JsonSchemaSpec,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormatType {
    JsonSchema,
}

/// The named schema inside a [`ResponseFormat`].
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct JsonSchemaSpec {
    pub name: String,
    pub schema: Value,
    pub strict: bool,
}

impl From<SchemaFormat> for ResponseFormat {
    fn from(format: SchemaFormat) -> Self {
        Self {
            r#type: ResponseFormatType::JsonSchema,
            json_schema: JsonSchemaSpec {
                name: format.name,
                schema: format.schema,
                strict: format.strict,
            },
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Low,
    Medium,
    High,
}

//! References to prompts stored on the server side.
//!
//! A reusable prompt is addressed by id, optionally pinned to a version, and
//! parameterized with JSON-valued variables.  The whole reference is passed
//! through to the request body verbatim; no rendering happens on the client.
//! Only the Responses endpoint understands these references.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A server-side prompt reference for the Responses `prompt` field.
///
/// ```rust
/// use openbatch_prompt::reusable::ReusablePrompt;
///
/// let prompt = ReusablePrompt::new("pmpt_abc123")
///     .version("2")
///     .variable("city", "Paris");
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReusablePrompt {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Map<String, Value>>,
}

impl ReusablePrompt {
    /// Reference the prompt with the given id at its latest version.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: None,
            variables: None,
        }
    }

    /// Pin the reference to a specific prompt version.
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Set one variable, creating the variable map on first use.
    pub fn variable(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Replace the whole variable map at once.
    pub fn variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = Some(variables);
        self
    }
}

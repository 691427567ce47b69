//! Builder-style helper for constructing **message templates**.
//!
//! Batch jobs usually send the same conversation skeleton hundreds of times
//! with only a few values swapped out per request.  `PromptTemplate` captures
//! that skeleton once: an ordered list of role-tagged messages whose content
//! may contain `{name}` placeholders.  Every method returns `self`, enabling
//! call-chaining:
//!
//! ```rust
//! use std::collections::HashMap;
//! use openbatch_prompt::template::PromptTemplate;
//!
//! let template = PromptTemplate::new()
//!     .system("You are a concise translator.")
//!     .user("Translate into {language}: {text}");
//!
//! let variables = HashMap::from([
//!     ("language".to_string(), "French".to_string()),
//!     ("text".to_string(), "good morning".to_string()),
//! ]);
//! let messages = template.render(&variables).unwrap();
//!
//! assert_eq!(messages[1].content, "Translate into French: good morning");
//! ```
//!
//! Rendering borrows the template, so one template instance can be rendered
//! against as many variable maps as the job needs.  Literal braces are
//! written as `{{` and `}}`.

use std::collections::HashMap;

use openbatch_core::error::OpenBatchError;
use openbatch_core::message::{Message, Role};
use thiserror::Error;

/// Errors surfaced while rendering a template.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A placeholder had no entry in the variable map.
    #[error("no value provided for placeholder `{{{name}}}`")]
    MissingVariable { name: String },

    /// A `{` was never closed, or a `}` appeared without an opening brace.
    /// `position` is the byte offset of the offending brace.
    #[error("unbalanced brace at byte {position}")]
    UnbalancedBrace { position: usize },
}

impl From<TemplateError> for OpenBatchError {
    fn from(value: TemplateError) -> Self {
        OpenBatchError::Batch(Box::new(value))
    }
}

/// An ordered list of role-tagged messages with `{name}` placeholders.
///
/// Build one with the fluent role methods, then call [`Self::render`] per
/// request to substitute the placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptTemplate {
    messages: Vec<Message>,
}

impl PromptTemplate {
    /// Create a fresh, empty template.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message with an explicit role.
    pub fn message(mut self, role: Role, content: impl Into<String>) -> Self {
        self.messages.push(Message::new(role, content));
        self
    }

    /// Append a `system` message.
    pub fn system(self, content: impl Into<String>) -> Self {
        self.message(Role::System, content)
    }

    /// Append a `developer` message.
    pub fn developer(self, content: impl Into<String>) -> Self {
        self.message(Role::Developer, content)
    }

    /// Append a `user` message.
    pub fn user(self, content: impl Into<String>) -> Self {
        self.message(Role::User, content)
    }

    /// Append an `assistant` message.
    pub fn assistant(self, content: impl Into<String>) -> Self {
        self.message(Role::Assistant, content)
    }

    /// The raw, unrendered messages in insertion order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// True when no message has been added yet.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Substitute every placeholder from `variables` and return the rendered
    /// conversation.  Message order and roles are preserved; entries in
    /// `variables` that no placeholder mentions are silently ignored.
    ///
    /// # Errors
    ///
    /// * [`TemplateError::MissingVariable`] when a placeholder has no entry
    ///   in the map.
    /// * [`TemplateError::UnbalancedBrace`] when braces do not pair up.
    pub fn render(
        &self,
        variables: &HashMap<String, String>,
    ) -> Result<Vec<Message>, TemplateError> {
        self.messages
            .iter()
            .map(|message| {
                Ok(Message::new(
                    message.role,
                    fill(&message.content, variables)?,
                ))
            })
            .collect()
    }
}

/// Substitute `{name}` placeholders in a single content string.
fn fill(template: &str, variables: &HashMap<String, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some(&(_, '{')) = chars.peek() {
                    chars.next();
                    out.push('{');
                    continue;
                }
                let mut name = String::new();
                let mut closed = false;
                for (_, inner) in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if !closed {
                    return Err(TemplateError::UnbalancedBrace { position: index });
                }
                match variables.get(&name) {
                    Some(value) => out.push_str(value),
                    None => return Err(TemplateError::MissingVariable { name }),
                }
            }
            '}' => {
                if let Some(&(_, '}')) = chars.peek() {
                    chars.next();
                    out.push('}');
                    continue;
                }
                return Err(TemplateError::UnbalancedBrace { position: index });
            }
            other => out.push(other),
        }
    }

    Ok(out)
}

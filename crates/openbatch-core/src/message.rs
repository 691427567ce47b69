//! Generic chat message and role types used across the workspace.
//!
//! They mirror the wire shape shared by the batch endpoints:
//! a message is a `role` plus UTF-8 `content`.  By staying minimal we can
//!
//! * embed them in request bodies without another mapping layer,
//! * produce them from rendered prompt templates, and
//! * use them in unit tests without mocking a transport layer.
//!
//! ## When to add more fields?
//!
//! Only if the additional data is **fundamentally endpoint-independent**.
//! Otherwise extend the endpoint-specific request type instead of bloating
//! this one.
use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lightweight container representing a single chat message.
///
/// * `role` – see [`Role`] for permitted values.
/// * `content` – the raw UTF-8 content.  Markdown is fine, but keep newlines
///   and indentation portable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Convenience constructor mirroring the field order used by the HTTP
    /// APIs (`role`, then `content`).
    ///
    /// ```rust
    /// use openbatch_core::message::{Message, Role};
    ///
    /// let sys = Message::new(Role::System, "You are a helpful bot.");
    /// ```
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Shorthand for a [`Role::System`] message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Shorthand for a [`Role::Developer`] message.
    pub fn developer(content: impl Into<String>) -> Self {
        Self::new(Role::Developer, content)
    }

    /// Shorthand for a [`Role::User`] message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Shorthand for a [`Role::Assistant`] message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// High-level chat roles recognised by the batch endpoints.
///
/// The `Display` implementation renders the canonical lowercase name so you
/// can feed it directly into JSON without extra mapping logic.
#[derive(Debug, Clone, Serialize, Deserialize, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// “System” messages define global behaviour and style guidelines.
    System,
    /// Like `system`, but takes precedence on reasoning-capable models.
    Developer,
    /// Messages originating from the human user.
    User,
    /// Messages produced by the assistant / model.
    Assistant,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::System => write!(f, "system"),
            Role::Developer => write!(f, "developer"),
            Role::User => write!(f, "user"),
            Role::Assistant => write!(f, "assistant"),
        }
    }
}

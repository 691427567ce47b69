//! Prompt construction helpers for batch jobs.
//!
//! Two flavours are supported: [`template::PromptTemplate`] renders
//! role-tagged messages with `{name}` placeholders on the client, while
//! [`reusable::ReusablePrompt`] defers to a prompt stored on the server.
//! [`source::PromptSource`] unifies the two for APIs that accept either.

pub mod reusable;
pub mod source;
pub mod template;

pub use reusable::ReusablePrompt;
pub use source::PromptSource;
pub use template::{PromptTemplate, TemplateError};

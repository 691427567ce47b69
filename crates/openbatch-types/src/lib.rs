//! Reusable value types for composing batch jobs.
//!
//! The heart of the crate is the instance family in [`instances`]: small
//! structs that carry the per-record slice of a bulk job, while the common
//! request carries everything shared.  [`input`] holds the embedding input
//! shape both layers agree on.

pub mod input;
pub mod instances;

pub use input::EmbeddingInput;
pub use instances::{EmbeddingInstance, MessagesInstance, TemplateInstance};

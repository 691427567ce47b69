//! Provider-agnostic foundations for building OpenAI batch input files.
//!
//! Everything in this crate is independent of any concrete API surface: the
//! higher layers compose these pieces into endpoint-specific request bodies
//! and batch envelopes.
//!
//! | Module | What it provides |
//! |--------|------------------|
//! | [`message`] | Chat messages and the role vocabulary |
//! | [`schema`]  | Schema derivation and the strict-mode rewrite |
//! | [`error`]   | The workspace-wide error type and `Result` alias |
//!
//! The crate stays small.  It knows how to describe *what* a model should
//! return, never how to talk to a server.

pub mod error;
pub mod message;
pub mod schema;

pub use error::{OpenBatchError, Result, SchemaError};
pub use message::{Message, Role};
pub use schema::SchemaFormat;

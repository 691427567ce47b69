//! # `openbatch` – The umbrella crate
//!
//! This crate is a *one-stop import* that glues together the four
//! building-block crates in the workspace
//!
//! | Crate                  | What it provides                                                               |
//! |------------------------|--------------------------------------------------------------------------------|
//! | **`openbatch-core`**   | Strict JSON Schema rewriting, typed schema derivation, messages, errors        |
//! | **`openbatch-prompt`** | Prompt templates with `{placeholder}` rendering, reusable prompt references    |
//! | **`openbatch-types`**  | Per-record instance types (`TemplateInstance`, `EmbeddingInstance`, …)         |
//! | **`openbatch-openai`** | Request models, JSONL manager/collector, batch-file validator *(optional)*     |
//!
//! By default the crate re-exports **core**, **prompt**, **types** and the
//! **openai** batch layer.  Disabling default features leaves only the
//! provider-agnostic pieces so the schema engine can be used on its own:
//!
//! ```toml
//! [dependencies]
//! openbatch = { version = "0.1", default-features = false }
//! ```
//!
//! ## Design philosophy
//!
//! * **Files, not calls** – This crate writes batch *input* files.  Uploading
//!   them and collecting results stays with you (or your HTTP client of
//!   choice), so there is no async runtime and no TLS stack in here.
//! * **No procedural macros** – Everything is powered by ordinary structs and
//!   `impl`s so you can understand and extend the code without magic.
//! * **Strict by construction** – Output schemas are derived with
//!   [`schemars`](https://docs.rs/schemars) and rewritten into the strict
//!   dialect the Batch API accepts *before* they reach the file.
//!
//! ## Quick example
//!
//! ```rust
//! use openbatch::openai::BatchCollector;
//! use openbatch::openai::api_v1::ResponsesRequest;
//! use openbatch::prompt::PromptTemplate;
//! use openbatch::types::TemplateInstance;
//!
//! // Define the answer shape
//! #[derive(serde::Deserialize, schemars::JsonSchema)]
//! struct Capital {
//!     city: String,
//! }
//!
//! fn main() -> anyhow::Result<()> {
//!     let dir = tempfile::tempdir()?;
//!     let mut collector = BatchCollector::open(dir.path().join("capitals.jsonl"))?;
//!
//!     let template = PromptTemplate::new()
//!         .system("You answer in one word.")
//!         .user("What is the capital of {country}?");
//!
//!     let written = collector
//!         .responses(ResponsesRequest::new("gpt-4.1"))
//!         .parse::<Capital>()?
//!         .create(template, vec![
//!             TemplateInstance::new("task-fr").variable("country", "France"),
//!             TemplateInstance::new("task-jp").variable("country", "Japan"),
//!         ])?;
//!     collector.flush()?;
//!
//!     println!("wrote {written} requests");
//!     Ok(())
//! }
//! ```
//!
//! ## Crate contents
//!
//! The `pub use` statements below simply forward the public API of the
//! individual crates so users can write `openbatch::openai::BatchCollector`
//! instead of juggling four separate dependencies.
//!
//! ---
//! _Happy batching & may your JSON always validate!_
#![doc(html_root_url = "https://docs.rs/openbatch/latest")]

pub use openbatch_core::*;
pub use openbatch_prompt as prompt;
pub use openbatch_types as types;

#[cfg(feature = "openai")]
pub use openbatch_openai as openai;

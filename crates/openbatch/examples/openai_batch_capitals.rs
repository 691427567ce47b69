//! # Capitals, in Bulk – Minimal yet *typed* batch job
//!
//! This example is the “smallest viable program” that
//!
//! 1. **Opens** a batch input file with [`BatchCollector`].
//! 2. **Builds** a prompt template with one `{country}` placeholder.
//! 3. **Declares** the answer shape (`Capital` below), so every request in
//!    the file carries a strict JSON schema the model *must* satisfy.
//! 4. **Writes** one request line per country and prints the file.
//!
//! ## How to run
//!
//! ```bash
//! cargo run -p openbatch --example openai_batch_capitals
//! ```
//!
//! You should see output similar to:
//!
//! ```text
//! wrote 3 requests to /tmp/openbatch_capitals.jsonl
//! {"custom_id":"capital-france","method":"POST","url":"/v1/responses", …}
//! ```
//!
//! The file is ready for `POST /v1/files` followed by `POST /v1/batches`;
//! uploading is out of scope here and stays with your HTTP client.
//!
//! ## Note on the schema pipeline
//!
//! Because `Capital` implements [`schemars::JsonSchema`] and is passed to
//! [`ResponsesScope::parse`], its derived schema is rewritten into the strict
//! dialect (every object closed, every property required) and injected into
//! each request under `text.format`, so the model can *only* reply with JSON
//! that matches our struct.
//!
//! [`BatchCollector`]: openbatch::openai::BatchCollector
//! [`ResponsesScope::parse`]: openbatch::openai::ResponsesScope::parse
////////////////////////////////////////////////////////////////////////////////

use openbatch::openai::BatchCollector;
use openbatch::openai::api_v1::ResponsesRequest;
use openbatch::prompt::PromptTemplate;
use openbatch::types::TemplateInstance;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The *shape* of the answer we expect from the model.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct Capital {
    city: String,
    country: String,
}

fn main() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join("openbatch_capitals.jsonl");

    let template = PromptTemplate::new()
        .system("You are a concise geography assistant.")
        .user("What is the capital of {country}?");

    let mut collector = BatchCollector::open(&path)?;
    let written = collector
        .responses(ResponsesRequest::new("gpt-4.1").temperature(0.0))
        .parse::<Capital>()?
        .create(
            template,
            vec![
                TemplateInstance::new("capital-france").variable("country", "France"),
                TemplateInstance::new("capital-japan").variable("country", "Japan"),
                TemplateInstance::new("capital-chile").variable("country", "Chile"),
            ],
        )?;
    collector.flush()?;

    println!("wrote {written} requests to {}", path.display());
    print!("{}", std::fs::read_to_string(&path)?);
    Ok(())
}

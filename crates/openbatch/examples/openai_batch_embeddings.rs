//! # Corpus to Vectors – Embeddings job plus a validation gate
//!
//! This example builds an Embeddings batch file and then runs the validator
//! twice: once over the good file, once over a file that was damaged on
//! purpose, so you can see what the report looks like in both cases.
//!
//! Embeddings are the simplest endpoint in the workspace. There is no prompt
//! and no output schema; each record only varies in its input, which may be
//! a single string or a batch of strings.
//!
//! ## Running the example
//!
//! ```bash
//! cargo run -p openbatch --example openai_batch_embeddings
//! ```
//!
//! Expected output (truncated):
//!
//! ```text
//! validation passed
//! …
//! validation failed
//! errors (2):
//!   - line 2: duplicate custom_id `doc-1`
//! …
//! ```

use openbatch::openai::api_v1::{EmbeddingsRequest, EncodingFormat};
use openbatch::openai::{BatchCollector, BatchJobManager, BatchRequest, Endpoint, validate_batch_file};
use openbatch::types::EmbeddingInstance;
use serde_json::json;

fn main() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    // A well-formed job: three documents, one of them chunked.
    let good = dir.path().join("corpus.jsonl");
    let mut collector = BatchCollector::open(&good)?;
    collector
        .embeddings(
            EmbeddingsRequest::new("text-embedding-3-small")
                .dimensions(512)
                .encoding_format(EncodingFormat::Float),
        )
        .create(vec![
            EmbeddingInstance::new("doc-1", "Rust is a systems programming language."),
            EmbeddingInstance::new("doc-2", "Batch jobs trade latency for throughput."),
            EmbeddingInstance::new("doc-3", vec!["First chunk.", "Second chunk."]),
        ])?;
    collector.flush()?;

    println!("{}\n", validate_batch_file(&good)?);

    // The same job, sabotaged: a duplicate custom_id and a body without input.
    let bad = dir.path().join("corpus-broken.jsonl");
    let mut manager = BatchJobManager::open(&bad)?;
    manager.add(
        "doc-1",
        &EmbeddingsRequest::new("text-embedding-3-small").input("Fine.".into()),
    )?;
    manager.add(
        "doc-1",
        &EmbeddingsRequest::new("text-embedding-3-small").input("Duplicate id.".into()),
    )?;
    manager.add_raw(&BatchRequest::new(
        "doc-4",
        Endpoint::Embeddings,
        json!({ "model": "text-embedding-3-small" }),
    ))?;
    manager.flush()?;

    println!("{}", validate_batch_file(&bad)?);
    Ok(())
}

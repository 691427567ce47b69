//! # Graded Homework – Chat Completions with per-record conversations
//!
//! This example demonstrates three ideas that run through the entire
//! *openbatch* workspace:
//!
//! 1. **Spelled-out conversations** with [`MessagesInstance`]. Instead of
//!    rendering one template, every record ships its own chat history.
//! 2. **Typed responses** on the Chat Completions endpoint. The schema lands
//!    under `response_format` (the Responses endpoint uses `text.format`).
//! 3. **Per-record overrides** via `request_option`. One record lowers the
//!    sampling temperature without touching the shared base request.
//!
//! ## Running the example
//!
//! ```bash
//! cargo run -p openbatch --example openai_batch_conversations
//! ```
//!
//! Expected output (truncated):
//!
//! ```text
//! wrote 2 requests
//! validation passed
//!   lines: 2 (2 requests, 0 empty)
//! …
//! ```
//!
//! The validation step at the end re-reads the finished file the way a
//! pre-upload gate would, so broken files never reach the API.

use openbatch::Message;
use openbatch::openai::api_v1::ChatCompletionsRequest;
use openbatch::openai::{BatchCollector, validate_batch_file};
use openbatch::types::MessagesInstance;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Structured grade we want back for every submitted answer.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct Grade {
    score: u8,
    justification: String,
}

fn main() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("homework.jsonl");

    let rubric = "Grade the student's answer from 0 to 10.";

    let mut collector = BatchCollector::open(&path)?;
    let written = collector
        .chat_completions(ChatCompletionsRequest::new("gpt-4.1").temperature(0.3))
        .parse::<Grade>()?
        .create_with_messages(vec![
            MessagesInstance::new(
                "homework-anna",
                vec![
                    Message::system(rubric),
                    Message::user("Q: Why do seasons change? A: Because Earth's axis is tilted."),
                ],
            ),
            MessagesInstance::new(
                "homework-ben",
                vec![
                    Message::system(rubric),
                    Message::user("Q: Why do seasons change? A: The Sun moves closer in summer."),
                ],
            )
            .request_option("temperature", json!(0.0)),
        ])?;
    collector.flush()?;

    println!("wrote {written} requests");
    println!("{}", validate_batch_file(&path)?);
    Ok(())
}

//! Append-only writer for batch input files.
//!
//! A batch input file is JSONL: one envelope per line, nothing else.  The
//! manager owns the open file and turns typed requests into lines, either
//! one at a time ([`BatchJobManager::add`]) or in bulk from a common base
//! request plus per-record instances ([`BatchJobManager::add_templated`]).
//!
//! ```rust
//! use openbatch_openai::BatchJobManager;
//! use openbatch_openai::api_v1::ResponsesRequest;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut manager = BatchJobManager::open(dir.path().join("job.jsonl")).unwrap();
//!
//! let request = ResponsesRequest::new("gpt-4.1").input_text("Say hello!");
//! manager.add("task-1", &request).unwrap();
//! manager.flush().unwrap();
//! ```
//!
//! Opening appends to an existing file rather than truncating it, so a job
//! can be assembled across several runs.  Writes are buffered; call
//! [`BatchJobManager::flush`] before handing the file to an uploader.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};

#[cfg(feature = "tracing")]
use tracing::debug;

use openbatch_core::error::Result;
use openbatch_prompt::source::PromptSource;
use openbatch_types::instances::{EmbeddingInstance, MessagesInstance, TemplateInstance};

use crate::api_v1::EmbeddingsRequest;
use crate::batch::BatchRequest;
use crate::error::BatchError;
use crate::request::{ApiRequest, GenerationRequest};

/// Writes batch request envelopes to one JSONL file.
pub struct BatchJobManager {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl BatchJobManager {
    /// Open `path` for appending, creating missing parent directories and
    /// the file itself as needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        #[cfg(feature = "tracing")]
        debug!(path = %path.display(), "opened batch input file");

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// The file this manager writes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one request under `custom_id`, routed to the endpoint its type
    /// names.
    pub fn add<R: ApiRequest>(&mut self, custom_id: impl Into<String>, request: &R) -> Result<()> {
        let body = serde_json::to_value(request)?;
        self.append(&BatchRequest::new(custom_id, R::ENDPOINT, body))
    }

    /// Append an envelope the caller assembled manually.
    pub fn add_raw(&mut self, request: &BatchRequest) -> Result<()> {
        self.append(request)
    }

    /// Append one envelope per instance, pairing `base` with a prompt
    /// source.
    ///
    /// For a [`PromptSource::Template`], each instance's variables render
    /// the template into messages.  For a [`PromptSource::Reusable`], the
    /// reference is carried as-is with the instance's variables laid over
    /// its own.  Instance `request_options` are merged into the serialized
    /// body last, so they win over anything the base request set.
    ///
    /// Returns the number of lines written.
    pub fn add_templated<R>(
        &mut self,
        prompt: &PromptSource,
        base: &R,
        instances: impl IntoIterator<Item = TemplateInstance>,
    ) -> Result<usize>
    where
        R: GenerationRequest + Clone,
    {
        let mut written = 0;
        for instance in instances {
            let mut request = base.clone();
            match prompt {
                PromptSource::Template(template) => {
                    request.set_messages(template.render(&instance.variables)?);
                }
                PromptSource::Reusable(reusable) => {
                    let mut reference = reusable.clone();
                    if !instance.variables.is_empty() {
                        let variables = reference.variables.get_or_insert_with(Map::new);
                        for (name, value) in &instance.variables {
                            variables.insert(name.clone(), Value::String(value.clone()));
                        }
                    }
                    request.set_reusable_prompt(reference)?;
                }
            }
            let body = merged_body(&request, &instance.request_options)?;
            self.append(&BatchRequest::new(instance.id, R::ENDPOINT, body))?;
            written += 1;
        }

        #[cfg(feature = "tracing")]
        debug!(written, path = %self.path.display(), "added templated requests");

        Ok(written)
    }

    /// Append one envelope per instance, each carrying its own spelled-out
    /// conversation.  Returns the number of lines written.
    pub fn add_messages<R>(
        &mut self,
        base: &R,
        instances: impl IntoIterator<Item = MessagesInstance>,
    ) -> Result<usize>
    where
        R: GenerationRequest + Clone,
    {
        let mut written = 0;
        for instance in instances {
            let mut request = base.clone();
            request.set_messages(instance.messages);
            let body = merged_body(&request, &instance.request_options)?;
            self.append(&BatchRequest::new(instance.id, R::ENDPOINT, body))?;
            written += 1;
        }
        Ok(written)
    }

    /// Append one embedding envelope per instance.  Returns the number of
    /// lines written.
    pub fn add_embeddings(
        &mut self,
        base: &EmbeddingsRequest,
        instances: impl IntoIterator<Item = EmbeddingInstance>,
    ) -> Result<usize> {
        let mut written = 0;
        for instance in instances {
            let mut request = base.clone();
            request.input = Some(instance.input);
            let body = merged_body(&request, &instance.request_options)?;
            self.append(&BatchRequest::new(
                instance.id,
                EmbeddingsRequest::ENDPOINT,
                body,
            ))?;
            written += 1;
        }
        Ok(written)
    }

    /// Push buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn append(&mut self, request: &BatchRequest) -> Result<()> {
        let line = serde_json::to_string(request)?;
        writeln!(self.writer, "{line}")?;

        #[cfg(feature = "tracing")]
        debug!(custom_id = %request.custom_id, url = %request.url, "appended batch request");

        Ok(())
    }
}

/// Serialize `request` and lay `overrides` over the resulting object.
fn merged_body(request: &impl Serialize, overrides: &Map<String, Value>) -> Result<Value> {
    let mut body = serde_json::to_value(request)?;
    if overrides.is_empty() {
        return Ok(body);
    }
    let Some(object) = body.as_object_mut() else {
        return Err(BatchError::MalformedBody(body.to_string()).into());
    };
    for (key, value) in overrides {
        object.insert(key.clone(), value.clone());
    }
    Ok(body)
}

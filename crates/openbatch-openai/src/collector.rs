//! Endpoint-scoped assembly of whole batch jobs.
//!
//! Where [`BatchJobManager`] thinks in single envelopes, the collector
//! thinks in jobs: pick an endpoint scope, optionally declare the output
//! type, then hand over the instances.
//!
//! ```rust
//! use openbatch_openai::BatchCollector;
//! use openbatch_openai::api_v1::ResponsesRequest;
//! use openbatch_prompt::PromptTemplate;
//! use openbatch_types::TemplateInstance;
//! use schemars::JsonSchema;
//!
//! #[derive(JsonSchema)]
//! struct Capital { city: String }
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut collector = BatchCollector::open(dir.path().join("job.jsonl")).unwrap();
//!
//! let template = PromptTemplate::new().user("What is the capital of {country}?");
//! let written = collector
//!     .responses(ResponsesRequest::new("gpt-4.1"))
//!     .parse::<Capital>()
//!     .unwrap()
//!     .create(template, vec![
//!         TemplateInstance::new("task-fr").variable("country", "France"),
//!         TemplateInstance::new("task-jp").variable("country", "Japan"),
//!     ])
//!     .unwrap();
//!
//! assert_eq!(written, 2);
//! ```
//!
//! [`BatchCollector::parse`] is how structured outputs enter the file: the
//! scope derives the type's schema, rewrites it into the strict dialect and
//! attaches the descriptor to every request built afterwards.  The
//! embeddings scope has no such method; there is nothing structured about
//! an embedding vector.

use std::path::Path;

use schemars::JsonSchema;

use openbatch_core::error::Result;
use openbatch_core::schema::SchemaFormat;
use openbatch_prompt::source::PromptSource;
use openbatch_types::instances::{EmbeddingInstance, MessagesInstance, TemplateInstance};

use crate::api_v1::{ChatCompletionsRequest, EmbeddingsRequest, ResponsesRequest};
use crate::manager::BatchJobManager;

/// Job-level front door over a [`BatchJobManager`].
pub struct BatchCollector {
    manager: BatchJobManager,
}

impl BatchCollector {
    /// Open (or create) the batch file at `path` for appending.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            manager: BatchJobManager::open(path)?,
        })
    }

    /// Wrap an already-open manager.
    pub fn from_manager(manager: BatchJobManager) -> Self {
        Self { manager }
    }

    /// Start a Responses job from `base`.
    pub fn responses(&mut self, base: ResponsesRequest) -> ResponsesScope<'_> {
        ResponsesScope {
            manager: &mut self.manager,
            base,
        }
    }

    /// Start a Chat Completions job from `base`.
    pub fn chat_completions(&mut self, base: ChatCompletionsRequest) -> ChatCompletionsScope<'_> {
        ChatCompletionsScope {
            manager: &mut self.manager,
            base,
        }
    }

    /// Start an Embeddings job from `base`.
    pub fn embeddings(&mut self, base: EmbeddingsRequest) -> EmbeddingsScope<'_> {
        EmbeddingsScope {
            manager: &mut self.manager,
            base,
        }
    }

    /// Push buffered lines to disk.
    pub fn flush(&mut self) -> Result<()> {
        self.manager.flush()
    }

    /// Recover the underlying manager, e.g. to mix in raw envelopes.
    pub fn into_manager(self) -> BatchJobManager {
        self.manager
    }
}

/// A pending Responses job: one base request, many instances.
pub struct ResponsesScope<'a> {
    manager: &'a mut BatchJobManager,
    base: ResponsesRequest,
}

impl ResponsesScope<'_> {
    /// Require every response in this scope to match `T`'s schema.
    ///
    /// The descriptor is named after `T` and attached under `text.format`.
    pub fn parse<T: JsonSchema>(mut self) -> Result<Self> {
        self.base.text = Some(SchemaFormat::for_type::<T>()?.into());
        Ok(self)
    }

    /// Render `prompt` against each instance and append the envelopes.
    /// Returns the number of lines written.
    pub fn create(
        self,
        prompt: impl Into<PromptSource>,
        instances: impl IntoIterator<Item = TemplateInstance>,
    ) -> Result<usize> {
        self.manager.add_templated(&prompt.into(), &self.base, instances)
    }

    /// Append one envelope per instance, each with its own conversation.
    pub fn create_with_messages(
        self,
        instances: impl IntoIterator<Item = MessagesInstance>,
    ) -> Result<usize> {
        self.manager.add_messages(&self.base, instances)
    }
}

/// A pending Chat Completions job: one base request, many instances.
pub struct ChatCompletionsScope<'a> {
    manager: &'a mut BatchJobManager,
    base: ChatCompletionsRequest,
}

impl ChatCompletionsScope<'_> {
    /// Require every completion in this scope to match `T`'s schema.
    ///
    /// The descriptor is named after `T` and attached under
    /// `response_format`.
    pub fn parse<T: JsonSchema>(mut self) -> Result<Self> {
        self.base.response_format = Some(SchemaFormat::for_type::<T>()?.into());
        Ok(self)
    }

    /// Render `prompt` against each instance and append the envelopes.
    /// Returns the number of lines written.
    pub fn create(
        self,
        prompt: impl Into<PromptSource>,
        instances: impl IntoIterator<Item = TemplateInstance>,
    ) -> Result<usize> {
        self.manager.add_templated(&prompt.into(), &self.base, instances)
    }

    /// Append one envelope per instance, each with its own conversation.
    pub fn create_with_messages(
        self,
        instances: impl IntoIterator<Item = MessagesInstance>,
    ) -> Result<usize> {
        self.manager.add_messages(&self.base, instances)
    }
}

/// A pending Embeddings job: one base request, many inputs.
///
/// The smallest scope. Embeddings take no prompt and no schema, so the
/// only thing left to vary per record is the input itself.
pub struct EmbeddingsScope<'a> {
    manager: &'a mut BatchJobManager,
    base: EmbeddingsRequest,
}

impl EmbeddingsScope<'_> {
    /// Append one envelope per instance.  Returns the number of lines
    /// written.
    pub fn create(
        self,
        instances: impl IntoIterator<Item = EmbeddingInstance>,
    ) -> Result<usize> {
        self.manager.add_embeddings(&self.base, instances)
    }
}

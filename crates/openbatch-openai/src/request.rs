//! The seam between typed request bodies and the batch envelope.
//!
//! Every request model names its endpoint at the type level, so the file
//! manager can route an envelope without being told where it goes.  The
//! capability split matters: all three models are [`ApiRequest`]s, but only
//! the two generation endpoints accept conversations or prompt references,
//! so only they implement [`GenerationRequest`].  Handing an embeddings
//! request to a prompt-driven helper is a compile error, not a runtime one.

use serde::Serialize;

use openbatch_core::message::Message;
use openbatch_prompt::reusable::ReusablePrompt;

use crate::api_v1::{ChatCompletionsRequest, EmbeddingsRequest, ResponsesInput, ResponsesRequest};
use crate::endpoint::Endpoint;
use crate::error::BatchError;

/// A request body that can ride in a batch envelope.
pub trait ApiRequest: Serialize {
    /// The endpoint this body is valid for.
    const ENDPOINT: Endpoint;
}

/// A request body that generates text from a conversation.
pub trait GenerationRequest: ApiRequest {
    /// Replace this request's conversation.
    fn set_messages(&mut self, messages: Vec<Message>);

    /// Attach a server-side prompt reference.
    ///
    /// # Errors
    ///
    /// [`BatchError::InvalidRequest`] when the endpoint has no notion of
    /// reusable prompts, which today means Chat Completions.
    fn set_reusable_prompt(&mut self, prompt: ReusablePrompt) -> Result<(), BatchError>;
}

impl ApiRequest for ResponsesRequest {
    const ENDPOINT: Endpoint = Endpoint::Responses;
}

impl GenerationRequest for ResponsesRequest {
    fn set_messages(&mut self, messages: Vec<Message>) {
        self.input = Some(ResponsesInput::Messages(messages));
    }

    fn set_reusable_prompt(&mut self, prompt: ReusablePrompt) -> Result<(), BatchError> {
        self.prompt = Some(prompt);
        Ok(())
    }
}

impl ApiRequest for ChatCompletionsRequest {
    const ENDPOINT: Endpoint = Endpoint::ChatCompletions;
}

impl GenerationRequest for ChatCompletionsRequest {
    fn set_messages(&mut self, messages: Vec<Message>) {
        self.messages = messages;
    }

    fn set_reusable_prompt(&mut self, _prompt: ReusablePrompt) -> Result<(), BatchError> {
        Err(BatchError::InvalidRequest(
            "reusable prompts are only supported by the Responses endpoint".to_string(),
        ))
    }
}

impl ApiRequest for EmbeddingsRequest {
    const ENDPOINT: Endpoint = Endpoint::Embeddings;
}

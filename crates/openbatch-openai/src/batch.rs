//! The per-line envelope of a batch input file.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::endpoint::Endpoint;

/// One line of a batch input file.
///
/// The batch runner treats every line independently: it routes `body` to
/// `url` and reports the outcome under `custom_id`.  `method` is always
/// `POST` for the endpoints this crate knows about.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BatchRequest {
    pub custom_id: String,
    pub method: String,
    pub url: String,
    pub body: Value,
}

impl BatchRequest {
    pub fn new(custom_id: impl Into<String>, endpoint: Endpoint, body: Value) -> Self {
        Self {
            custom_id: custom_id.into(),
            method: "POST".to_string(),
            url: endpoint.path().to_string(),
            body,
        }
    }

    /// The endpoint this envelope addresses, if `url` is one of ours.
    pub fn endpoint(&self) -> Option<Endpoint> {
        Endpoint::from_path(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn envelopes_serialize_with_all_four_keys() {
        let request = BatchRequest::new(
            "task-1",
            Endpoint::Responses,
            json!({ "model": "gpt-4.1", "input": "hello" }),
        );
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "custom_id": "task-1",
                "method": "POST",
                "url": "/v1/responses",
                "body": { "model": "gpt-4.1", "input": "hello" }
            })
        );
    }

    #[test]
    fn endpoint_is_recovered_from_the_url() {
        let request = BatchRequest::new("task-1", Endpoint::Embeddings, json!({}));
        assert_eq!(request.endpoint(), Some(Endpoint::Embeddings));
    }
}

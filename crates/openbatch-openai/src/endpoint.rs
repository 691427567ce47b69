use std::fmt;

use serde::{Deserialize, Serialize};

pub const RESPONSES_PATH: &str = "/v1/responses";
pub const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
pub const EMBEDDINGS_PATH: &str = "/v1/embeddings";

/// The batch-capable API surfaces and their relative URLs.
///
/// The batch runner routes every line of an input file to the endpoint named
/// in its envelope.  An unknown path makes the whole line fail server-side,
/// so the set stays closed.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Endpoint {
    Responses,
    ChatCompletions,
    Embeddings,
}

impl Endpoint {
    /// The relative URL carried in the batch envelope.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Responses => RESPONSES_PATH,
            Endpoint::ChatCompletions => CHAT_COMPLETIONS_PATH,
            Endpoint::Embeddings => EMBEDDINGS_PATH,
        }
    }

    /// Map a relative URL back to its endpoint, if it is one of ours.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            RESPONSES_PATH => Some(Endpoint::Responses),
            CHAT_COMPLETIONS_PATH => Some(Endpoint::ChatCompletions),
            EMBEDDINGS_PATH => Some(Endpoint::Embeddings),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_round_trip() {
        for endpoint in [
            Endpoint::Responses,
            Endpoint::ChatCompletions,
            Endpoint::Embeddings,
        ] {
            assert_eq!(Endpoint::from_path(endpoint.path()), Some(endpoint));
        }
    }

    #[test]
    fn unknown_paths_are_rejected() {
        assert_eq!(Endpoint::from_path("/v1/files"), None);
        assert_eq!(Endpoint::from_path("responses"), None);
    }

    #[test]
    fn display_prints_the_relative_url() {
        assert_eq!(Endpoint::ChatCompletions.to_string(), "/v1/chat/completions");
    }
}

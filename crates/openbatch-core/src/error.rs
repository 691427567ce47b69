//! Unified error types exposed by **`openbatch-core`**.
//!
//! Downstream crates should convert their internal errors into one of these
//! variants before bubbling them up to the caller.  This keeps the public API
//! small while still conveying rich diagnostic information.

use thiserror::Error;

/// Convenient alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, OpenBatchError>;

#[derive(Debug, Error)]
pub enum OpenBatchError {
    /// A schema document could not be rewritten into the strict dialect.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Failure while serialising or deserialising JSON payloads destined for
    /// a batch file.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure while touching a batch file on disk.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic forwarding of any layer-specific error that doesn't fit
    /// another category.
    #[error("batch layer returned an error: {0}")]
    Batch(Box<dyn std::error::Error + Send + Sync + 'static>),
}

/// Failure modes of the schema rewrite and its reference resolver.
///
/// Every variant points at a malformed input document rather than a transient
/// condition.  Callers should surface them to the author of the offending
/// type instead of retrying or substituting a default schema.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// A `$ref` string does not use the local `#/` pointer prefix.  Remote
    /// and external-document references are never resolved.
    #[error("reference `{reference}` is not a local pointer (expected a `#/` prefix)")]
    MalformedReference { reference: String },

    /// A `$ref` path does not lead to a usable schema node in the document.
    #[error("reference `{reference}` does not resolve (failed at segment `{segment}`)")]
    ReferenceNotFound { reference: String, segment: String },

    /// A chain of `$ref` nodes with sibling keys loops back into a reference
    /// that is still being inlined.
    #[error("reference `{reference}` cycles back into itself at `{path}`")]
    CyclicReference { reference: String, path: String },
}

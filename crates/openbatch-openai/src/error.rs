use openbatch_core::error::OpenBatchError;

/// Failure modes specific to assembling batch request lines.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("batch body must serialise to a JSON object, got: {0}")]
    MalformedBody(String),
}

impl From<BatchError> for OpenBatchError {
    fn from(value: BatchError) -> Self {
        OpenBatchError::Batch(Box::new(value))
    }
}

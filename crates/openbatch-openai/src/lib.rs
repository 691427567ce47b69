mod batch;
mod collector;
mod endpoint;
mod manager;
mod request;
mod validation;

pub use batch::BatchRequest;
pub use collector::{BatchCollector, ChatCompletionsScope, EmbeddingsScope, ResponsesScope};
pub use endpoint::{CHAT_COMPLETIONS_PATH, EMBEDDINGS_PATH, Endpoint, RESPONSES_PATH};
pub use manager::BatchJobManager;
pub use request::{ApiRequest, GenerationRequest};
pub use validation::{
    BatchFileValidator, MAX_FILE_SIZE_BYTES, MAX_REQUESTS_PER_FILE, ValidationReport,
    ValidationStats, quick_validate, validate_batch_file,
};
pub mod api_v1;
pub mod error;

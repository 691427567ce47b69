mod chat_completion;
mod common;
mod embeddings;
mod responses;

pub use chat_completion::*;
pub use common::*;
pub use embeddings::*;
pub use responses::*;

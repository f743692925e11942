mod error;
mod openai;

pub use error::EmbeddingProviderError;
pub use openai::OpenAiEmbedder;

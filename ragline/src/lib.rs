//! Sequential RAG orchestration over external converter, embedding,
//! vector-store and completion services.

mod config;
mod error;
mod in_memory;
mod pipeline;

pub use config::{ConfigError, Settings};
pub use error::PipelineError;
pub use in_memory::InMemoryVectorStore;
pub use pipeline::{Answer, IngestReport, Pipeline, PipelineConfig, DEFAULT_TOP_K};

pub use ragline_convert::{
    Conversion, ConverterClient, DocumentConverter, DocumentInfo, DocumentSource, ServiceHealth,
};
pub use ragline_core::{EmbedError, Record, SearchResult, StoreError, TextEmbedder, VectorStore};
pub use ragline_embeddings::OpenAiEmbedder;
pub use ragline_llm::{ChatModel, Message, OpenAiCompatibleClient, Role};
pub use ragline_milvus::MilvusVectorStore;
pub use ragline_prompt::{rag_prompt, PromptTemplate, RAG_TEMPLATE};

mod embedder;
mod error;
mod record;
mod store;

pub use embedder::TextEmbedder;
pub use error::{EmbedError, StoreError};
pub use record::{Record, SearchResult};
pub use store::VectorStore;

use async_trait::async_trait;

use crate::{Record, SearchResult, StoreError};

/// A vector-database collection bound to a store instance.
///
/// `insert` sends the whole batch in one call; no partial-failure
/// handling exists beyond what the store itself reports. `search`
/// returns at most `limit` results ordered by descending score, fewer
/// when the collection is smaller.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn create_collection(&self, dimension: usize) -> Result<(), StoreError>;

    async fn drop_collection(&self) -> Result<(), StoreError>;

    async fn insert(&self, records: Vec<Record>) -> Result<(), StoreError>;

    async fn search(&self, query: &[f32], limit: usize)
        -> Result<Vec<SearchResult>, StoreError>;
}

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use ragline_core::{Record, SearchResult, StoreError, VectorStore};

#[derive(Default)]
struct StoreInner {
    exists: bool,
    dimension: Option<usize>,
    ids: HashSet<i64>,
    records: Vec<Record>,
}

/// In-process store with cosine scoring; backs the pipeline tests and
/// local experiments where no Milvus instance is around.
#[derive(Clone)]
pub struct InMemoryVectorStore {
    collection: String,
    inner: Arc<RwLock<StoreInner>>,
}

impl InMemoryVectorStore {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            inner: Arc::new(RwLock::new(StoreInner::default())),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub async fn records(&self) -> Vec<Record> {
        self.inner.read().await.records.clone()
    }
}

#[async_trait::async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn create_collection(&self, dimension: usize) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.exists = true;
        inner.dimension = Some(dimension);
        inner.ids.clear();
        inner.records.clear();
        Ok(())
    }

    async fn drop_collection(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner.exists = false;
        inner.dimension = None;
        inner.ids.clear();
        inner.records.clear();
        Ok(())
    }

    async fn insert(&self, records: Vec<Record>) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.exists {
            return Err(StoreError::CollectionMissing(self.collection.clone()));
        }

        for record in records {
            if let Some(expected) = inner.dimension {
                if expected != record.vector.len() {
                    return Err(StoreError::DimensionMismatch {
                        expected,
                        got: record.vector.len(),
                    });
                }
            }
            if !inner.ids.insert(record.id) {
                return Err(StoreError::DuplicateId(record.id));
            }
            inner.records.push(record);
        }
        Ok(())
    }

    async fn search(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>, StoreError> {
        let inner = self.inner.read().await;
        if !inner.exists {
            return Err(StoreError::CollectionMissing(self.collection.clone()));
        }

        let expected = inner.dimension.unwrap_or(query.len());
        if expected != query.len() {
            return Err(StoreError::DimensionMismatch {
                expected,
                got: query.len(),
            });
        }

        let mut scored = Vec::with_capacity(inner.records.len());
        for record in &inner.records {
            let mut score = cosine_similarity(query, &record.vector);
            if score.is_nan() {
                score = f32::NEG_INFINITY;
            }
            scored.push(SearchResult {
                text: record.text.clone(),
                score,
            });
        }

        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(limit);
        Ok(scored)
    }
}

fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

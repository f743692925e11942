use std::sync::Arc;

use async_trait::async_trait;

use ragline_core::{Record, SearchResult, StoreError, VectorStore};

struct TestStore;

#[async_trait]
impl VectorStore for TestStore {
    async fn create_collection(&self, _dimension: usize) -> Result<(), StoreError> {
        Ok(())
    }

    async fn drop_collection(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn insert(&self, _records: Vec<Record>) -> Result<(), StoreError> {
        Ok(())
    }

    async fn search(
        &self,
        _query: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>, StoreError> {
        Ok(vec![
            SearchResult {
                text: "hit".to_string(),
                score: 0.5,
            };
            limit
        ])
    }
}

fn assert_object_safe(_store: Arc<dyn VectorStore>) {}

#[test]
fn store_trait_is_object_safe() {
    let store = Arc::new(TestStore);
    assert_object_safe(store);
}

#[tokio::test]
async fn search_honors_limit() {
    let store = TestStore;
    let results = store.search(&[0.0], 3).await.unwrap();
    assert_eq!(results.len(), 3);
}

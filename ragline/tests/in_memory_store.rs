use ragline::{InMemoryVectorStore, Record, StoreError, VectorStore};

fn record(id: i64, vector: Vec<f32>, text: &str) -> Record {
    Record {
        id,
        vector,
        text: text.to_string(),
    }
}

#[tokio::test]
async fn insert_requires_an_existing_collection() {
    let store = InMemoryVectorStore::new("docs");
    let err = store
        .insert(vec![record(0, vec![1.0], "a")])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::CollectionMissing(_)));
}

#[tokio::test]
async fn insert_rejects_duplicate_ids() {
    let store = InMemoryVectorStore::new("docs");
    store.create_collection(1).await.unwrap();
    store.insert(vec![record(0, vec![1.0], "a")]).await.unwrap();

    let err = store
        .insert(vec![record(0, vec![0.5], "b")])
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::DuplicateId(0)));
}

#[tokio::test]
async fn insert_rejects_wrong_dimension() {
    let store = InMemoryVectorStore::new("docs");
    store.create_collection(2).await.unwrap();

    let err = store
        .insert(vec![record(0, vec![1.0], "a")])
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StoreError::DimensionMismatch {
            expected: 2,
            got: 1
        }
    ));
}

#[tokio::test]
async fn search_returns_k_results_sorted_by_descending_score() {
    let store = InMemoryVectorStore::new("docs");
    store.create_collection(2).await.unwrap();
    store
        .insert(vec![
            record(0, vec![1.0, 0.0], "east"),
            record(1, vec![0.0, 1.0], "north"),
            record(2, vec![0.7, 0.7], "northeast"),
        ])
        .await
        .unwrap();

    let results = store.search(&[1.0, 0.0], 2).await.unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].text, "east");
    assert!(results[0].score >= results[1].score);
}

#[tokio::test]
async fn drop_and_recreate_empties_the_collection() {
    let store = InMemoryVectorStore::new("docs");
    store.create_collection(1).await.unwrap();
    store.insert(vec![record(0, vec![1.0], "a")]).await.unwrap();

    store.drop_collection().await.unwrap();
    store.create_collection(1).await.unwrap();

    assert!(store.records().await.is_empty());
    // The id space resets with the collection.
    store.insert(vec![record(0, vec![0.5], "b")]).await.unwrap();
    assert_eq!(store.records().await.len(), 1);
}

#[tokio::test]
async fn search_requires_an_existing_collection() {
    let store = InMemoryVectorStore::new("docs");
    let err = store.search(&[1.0], 3).await.unwrap_err();
    assert!(matches!(err, StoreError::CollectionMissing(_)));
}

use ragline_milvus::{MilvusStoreError, MilvusVectorStore, DEFAULT_METRIC};

#[test]
fn builder_requires_base_url() {
    let err = MilvusVectorStore::builder()
        .collection("docs")
        .build()
        .unwrap_err();
    assert!(matches!(err, MilvusStoreError::MissingBaseUrl));
}

#[test]
fn builder_rejects_empty_base_url() {
    let err = MilvusVectorStore::builder()
        .base_url("  ")
        .collection("docs")
        .build()
        .unwrap_err();
    assert!(matches!(err, MilvusStoreError::EmptyBaseUrl));
}

#[test]
fn builder_requires_collection() {
    let err = MilvusVectorStore::builder()
        .base_url("http://localhost:19530")
        .build()
        .unwrap_err();
    assert!(matches!(err, MilvusStoreError::MissingCollection));
}

#[test]
fn builder_rejects_empty_collection() {
    let err = MilvusVectorStore::builder()
        .base_url("http://localhost:19530")
        .collection("")
        .build()
        .unwrap_err();
    assert!(matches!(err, MilvusStoreError::EmptyCollection));
}

#[test]
fn builder_applies_metric_and_consistency_defaults() {
    let store = MilvusVectorStore::builder()
        .base_url("http://localhost:19530")
        .collection("docs")
        .build()
        .unwrap();

    assert_eq!(store.metric(), DEFAULT_METRIC);
    assert_eq!(store.collection(), "docs");
}

#[test]
fn builder_ignores_blank_token() {
    let store = MilvusVectorStore::builder()
        .base_url("http://localhost:19530")
        .collection("docs")
        .token("   ")
        .build()
        .unwrap();
    assert!(format!("{store:?}").contains("<none>"));
}

#[test]
fn debug_redacts_token() {
    let store = MilvusVectorStore::builder()
        .base_url("http://localhost:19530")
        .collection("docs")
        .token("root:Milvus")
        .build()
        .unwrap();

    let rendered = format!("{store:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains("root:Milvus"));
}

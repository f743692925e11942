use ragline_core::{EmbedError, StoreError};

#[test]
fn embed_error_display_for_provider() {
    let err = EmbedError::Provider("rate limited".to_string());
    assert_eq!(format!("{err}"), "embedding provider error: rate limited");
}

#[test]
fn embed_error_display_for_dimension_mismatch() {
    let err = EmbedError::DimensionMismatch {
        expected: 1536,
        got: 768,
    };
    assert_eq!(
        format!("{err}"),
        "dimension mismatch: expected 1536, got 768"
    );
}

#[test]
fn store_error_display_for_duplicate_id() {
    let err = StoreError::DuplicateId(7);
    assert_eq!(format!("{err}"), "duplicate record id 7");
}

#[test]
fn store_error_display_for_missing_collection() {
    let err = StoreError::CollectionMissing("docs".to_string());
    assert_eq!(format!("{err}"), "collection 'docs' does not exist");
}

#[test]
fn store_error_display_for_internal() {
    let err = StoreError::Internal(Box::new(std::io::Error::other("connection reset")));
    assert_eq!(format!("{err}"), "store error: connection reset");
}

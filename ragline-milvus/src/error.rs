use ragline_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MilvusStoreError {
    #[error("invalid configuration: base_url is required")]
    MissingBaseUrl,
    #[error("invalid configuration: base_url cannot be empty")]
    EmptyBaseUrl,
    #[error("invalid configuration: collection is required")]
    MissingCollection,
    #[error("invalid configuration: collection cannot be empty")]
    EmptyCollection,
    #[error("duplicate record id {0} in insert batch")]
    DuplicateRecordId(i64),
    #[error("milvus request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("collection '{collection}' not found: {message}")]
    CollectionNotFound { collection: String, message: String },
    #[error("milvus returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("milvus returned error code {code}: {message}")]
    Server { code: i64, message: String },
    #[error("invalid milvus response: {message}")]
    InvalidResponse { message: String },
}

impl From<MilvusStoreError> for StoreError {
    fn from(value: MilvusStoreError) -> Self {
        match value {
            MilvusStoreError::DuplicateRecordId(id) => StoreError::DuplicateId(id),
            MilvusStoreError::CollectionNotFound { collection, .. } => {
                StoreError::CollectionMissing(collection)
            }
            other => StoreError::Internal(Box::new(other)),
        }
    }
}

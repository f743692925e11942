//! Milvus vector store integration for ragline.
//!
//! Speaks the Milvus v2 RESTful API: collection create/drop, batch
//! entity insert and vector similarity search.

mod config;
mod error;
mod wire;

use std::collections::HashSet;
use std::fmt;

pub use config::{MilvusStoreBuilder, DEFAULT_CONSISTENCY_LEVEL, DEFAULT_METRIC};
pub use error::MilvusStoreError;

use ragline_core::{Record, SearchResult, StoreError, VectorStore};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use wire::{
    CreateCollectionRequest, DropCollectionRequest, Envelope, InsertRequest, RecordPayload,
    SearchHit, SearchParams, SearchRequest,
};

// Milvus error code for a missing collection.
const COLLECTION_NOT_FOUND_CODE: i64 = 100;

#[derive(Clone)]
pub struct MilvusVectorStore {
    pub(crate) client: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) token: Option<String>,
    pub(crate) collection: String,
    pub(crate) metric: String,
    pub(crate) consistency_level: String,
}

impl fmt::Debug for MilvusVectorStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("MilvusVectorStore")
            .field("base_url", &self.base_url)
            .field("collection", &self.collection)
            .field("metric", &self.metric)
            .field("consistency_level", &self.consistency_level)
            .field("token", &token)
            .finish()
    }
}

impl MilvusVectorStore {
    pub fn builder() -> MilvusStoreBuilder {
        MilvusStoreBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request_builder(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.post(self.endpoint(path));

        if let Some(token) = self.token.as_deref() {
            request.bearer_auth(token)
        } else {
            request
        }
    }

    async fn send_and_decode<T: for<'de> Deserialize<'de> + Default>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<Envelope<T>, MilvusStoreError> {
        let response = request.send().await.map_err(MilvusStoreError::from)?;
        let status = response.status();
        let body = response.text().await.map_err(MilvusStoreError::from)?;

        if !status.is_success() {
            return Err(MilvusStoreError::HttpStatus {
                status: status.as_u16(),
                message: milvus_error_message(&body),
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|err| MilvusStoreError::InvalidResponse {
                message: format!("failed to decode milvus response body: {err}"),
            })?;

        if envelope.code != 0 {
            return Err(self.server_error(&envelope));
        }

        Ok(envelope)
    }

    fn server_error<T>(&self, envelope: &Envelope<T>) -> MilvusStoreError {
        let message = envelope
            .message
            .clone()
            .unwrap_or_else(|| "unknown milvus error".to_string());

        if envelope.code == COLLECTION_NOT_FOUND_CODE {
            return MilvusStoreError::CollectionNotFound {
                collection: self.collection.clone(),
                message,
            };
        }

        MilvusStoreError::Server {
            code: envelope.code,
            message,
        }
    }
}

#[async_trait::async_trait]
impl VectorStore for MilvusVectorStore {
    async fn create_collection(&self, dimension: usize) -> Result<(), StoreError> {
        tracing::debug!(
            collection = %self.collection,
            dimension,
            metric = %self.metric,
            "creating milvus collection"
        );

        let request = CreateCollectionRequest {
            collection_name: self.collection.clone(),
            dimension,
            metric_type: self.metric.clone(),
            consistency_level: self.consistency_level.clone(),
        };
        let _: Envelope<JsonValue> = self
            .send_and_decode(
                self.request_builder("v2/vectordb/collections/create")
                    .json(&request),
            )
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }

    async fn drop_collection(&self) -> Result<(), StoreError> {
        let request = DropCollectionRequest {
            collection_name: self.collection.clone(),
        };
        let _: Envelope<JsonValue> = self
            .send_and_decode(
                self.request_builder("v2/vectordb/collections/drop")
                    .json(&request),
            )
            .await
            .map_err(StoreError::from)?;

        Ok(())
    }

    async fn insert(&self, records: Vec<Record>) -> Result<(), StoreError> {
        if records.is_empty() {
            return Ok(());
        }

        let mut seen_ids = HashSet::with_capacity(records.len());
        let mut expected_dimension: Option<usize> = None;

        for record in &records {
            if !seen_ids.insert(record.id) {
                return Err(MilvusStoreError::DuplicateRecordId(record.id).into());
            }
            match expected_dimension {
                Some(expected) if expected != record.vector.len() => {
                    return Err(StoreError::DimensionMismatch {
                        expected,
                        got: record.vector.len(),
                    });
                }
                None => expected_dimension = Some(record.vector.len()),
                _ => {}
            }
        }

        let count = records.len();
        let request = InsertRequest {
            collection_name: self.collection.clone(),
            data: records.into_iter().map(RecordPayload::from).collect(),
        };
        let _: Envelope<JsonValue> = self
            .send_and_decode(self.request_builder("v2/vectordb/entities/insert").json(&request))
            .await
            .map_err(StoreError::from)?;

        tracing::debug!(collection = %self.collection, count, "records inserted");
        Ok(())
    }

    async fn search(
        &self,
        query: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchResult>, StoreError> {
        if query.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let request = SearchRequest {
            collection_name: self.collection.clone(),
            data: vec![query.to_vec()],
            limit,
            output_fields: vec!["text".to_string()],
            search_params: SearchParams {
                metric_type: self.metric.clone(),
            },
        };

        let envelope: Envelope<Vec<SearchHit>> = self
            .send_and_decode(self.request_builder("v2/vectordb/entities/search").json(&request))
            .await
            .map_err(StoreError::from)?;

        let hits = envelope.data.ok_or_else(|| {
            StoreError::from(MilvusStoreError::InvalidResponse {
                message: "search response is missing data".to_string(),
            })
        })?;

        let mut results: Vec<SearchResult> = hits.into_iter().map(SearchResult::from).collect();
        results.sort_by(|left, right| right.score.total_cmp(&left.score));
        Ok(results)
    }
}

#[derive(Debug, Deserialize)]
struct MilvusErrorEnvelope {
    message: String,
}

fn milvus_error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "unknown milvus error".to_string();
    }

    serde_json::from_str::<MilvusErrorEnvelope>(trimmed)
        .map(|envelope| envelope.message)
        .unwrap_or_else(|_| trimmed.to_string())
}

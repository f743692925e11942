use ragline_core::{Record, SearchResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCollectionRequest {
    pub collection_name: String,
    pub dimension: usize,
    pub metric_type: String,
    pub consistency_level: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropCollectionRequest {
    pub collection_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertRequest {
    pub collection_name: String,
    pub data: Vec<RecordPayload>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordPayload {
    pub id: i64,
    pub vector: Vec<f32>,
    pub text: String,
}

impl From<Record> for RecordPayload {
    fn from(record: Record) -> Self {
        Self {
            id: record.id,
            vector: record.vector,
            text: record.text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub collection_name: String,
    pub data: Vec<Vec<f32>>,
    pub limit: usize,
    pub output_fields: Vec<String>,
    pub search_params: SearchParams,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub metric_type: String,
}

/// Milvus wraps every response in a `{ code, message, data }` envelope;
/// a non-zero code is a server-side error.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct SearchHit {
    pub distance: f32,
    pub text: String,
}

impl From<SearchHit> for SearchResult {
    fn from(hit: SearchHit) -> Self {
        SearchResult {
            text: hit.text,
            score: hit.distance,
        }
    }
}

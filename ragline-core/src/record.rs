use serde::{Deserialize, Serialize};

/// One persisted (identifier, vector, text) triple.
///
/// Identifiers are assigned by the caller at insertion time as
/// monotonically increasing integers starting from 0 and are unique
/// within a collection.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub id: i64,
    pub vector: Vec<f32>,
    pub text: String,
}

/// One similarity hit returned by a vector store, ordered by
/// descending score within a result set.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    pub text: String,
    pub score: f32,
}

use std::fmt;

use crate::{MilvusStoreError, MilvusVectorStore};

pub const DEFAULT_METRIC: &str = "IP";
pub const DEFAULT_CONSISTENCY_LEVEL: &str = "Strong";

#[derive(Default, Clone)]
pub struct MilvusStoreBuilder {
    base_url: Option<String>,
    token: Option<String>,
    collection: Option<String>,
    metric: Option<String>,
    consistency_level: Option<String>,
}

impl fmt::Debug for MilvusStoreBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.token.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("MilvusStoreBuilder")
            .field("base_url", &self.base_url)
            .field("collection", &self.collection)
            .field("metric", &self.metric)
            .field("consistency_level", &self.consistency_level)
            .field("token", &token)
            .finish()
    }
}

impl MilvusStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    pub fn token(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.token = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    pub fn collection(mut self, value: impl Into<String>) -> Self {
        self.collection = Some(value.into());
        self
    }

    pub fn metric(mut self, value: impl Into<String>) -> Self {
        self.metric = Some(value.into());
        self
    }

    pub fn consistency_level(mut self, value: impl Into<String>) -> Self {
        self.consistency_level = Some(value.into());
        self
    }

    pub fn build(self) -> Result<MilvusVectorStore, MilvusStoreError> {
        let base_url = self.base_url.ok_or(MilvusStoreError::MissingBaseUrl)?;
        if base_url.trim().is_empty() {
            return Err(MilvusStoreError::EmptyBaseUrl);
        }

        let collection = self.collection.ok_or(MilvusStoreError::MissingCollection)?;
        if collection.trim().is_empty() {
            return Err(MilvusStoreError::EmptyCollection);
        }

        if looks_like_zilliz_cloud(&base_url) && self.token.is_none() {
            tracing::warn!(
                base_url = %base_url,
                "zilliz cloud URL detected without a token; requests may fail"
            );
        }

        Ok(MilvusVectorStore {
            client: reqwest::Client::new(),
            base_url,
            token: self.token,
            collection,
            metric: self.metric.unwrap_or_else(|| DEFAULT_METRIC.to_string()),
            consistency_level: self
                .consistency_level
                .unwrap_or_else(|| DEFAULT_CONSISTENCY_LEVEL.to_string()),
        })
    }
}

fn looks_like_zilliz_cloud(base_url: &str) -> bool {
    const CLOUD_DOMAIN: &[u8] = b"zillizcloud.com";

    base_url
        .as_bytes()
        .windows(CLOUD_DOMAIN.len())
        .any(|window| window.eq_ignore_ascii_case(CLOUD_DOMAIN))
}

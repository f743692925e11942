use std::env;

use thiserror::Error;

use ragline_convert::{ConvertError, ConverterClient};
use ragline_embeddings::OpenAiEmbedder;
use ragline_llm::{CompletionError, OpenAiCompatibleClient};
use ragline_milvus::{MilvusStoreError, MilvusVectorStore};

use crate::{Pipeline, PipelineConfig, DEFAULT_TOP_K};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {name}: {reason}")]
    InvalidVar { name: &'static str, reason: String },
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error(transparent)]
    Store(#[from] MilvusStoreError),
    #[error(transparent)]
    Completion(#[from] CompletionError),
}

/// Environment-sourced settings for the concrete service clients.
#[derive(Clone, Debug)]
pub struct Settings {
    pub converter_url: String,
    pub converter_api_key: Option<String>,
    pub embeddings_url: String,
    pub embeddings_api_key: Option<String>,
    pub embedding_model: String,
    pub embedding_dimension: usize,
    pub milvus_url: String,
    pub milvus_token: Option<String>,
    pub collection: String,
    pub chat_url: String,
    pub chat_api_key: Option<String>,
    pub chat_model: String,
    pub top_k: usize,
    pub require_accelerator: bool,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let embedding_dimension = required("RAGLINE_EMBEDDING_DIMENSION")?
            .parse::<usize>()
            .map_err(|err| ConfigError::InvalidVar {
                name: "RAGLINE_EMBEDDING_DIMENSION",
                reason: err.to_string(),
            })?;

        let top_k = match optional("RAGLINE_TOP_K") {
            Some(value) => value.parse::<usize>().map_err(|err| ConfigError::InvalidVar {
                name: "RAGLINE_TOP_K",
                reason: err.to_string(),
            })?,
            None => DEFAULT_TOP_K,
        };

        Ok(Self {
            converter_url: required("RAGLINE_CONVERTER_URL")?,
            converter_api_key: optional("RAGLINE_CONVERTER_API_KEY"),
            embeddings_url: required("RAGLINE_EMBEDDINGS_URL")?,
            embeddings_api_key: optional("RAGLINE_EMBEDDINGS_API_KEY"),
            embedding_model: required("RAGLINE_EMBEDDING_MODEL")?,
            embedding_dimension,
            milvus_url: required("RAGLINE_MILVUS_URL")?,
            milvus_token: optional("RAGLINE_MILVUS_TOKEN"),
            collection: optional("RAGLINE_COLLECTION")
                .unwrap_or_else(|| "rag_collection".to_string()),
            chat_url: required("RAGLINE_CHAT_URL")?,
            chat_api_key: optional("RAGLINE_CHAT_API_KEY"),
            chat_model: required("RAGLINE_CHAT_MODEL")?,
            top_k,
            require_accelerator: optional("RAGLINE_REQUIRE_ACCELERATOR")
                .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        })
    }

    /// Wires the concrete clients into a ready pipeline.
    pub fn build_pipeline(
        &self,
    ) -> Result<
        Pipeline<ConverterClient, OpenAiEmbedder, MilvusVectorStore, OpenAiCompatibleClient>,
        ConfigError,
    > {
        let mut converter = ConverterClient::builder().base_url(&self.converter_url);
        if let Some(api_key) = &self.converter_api_key {
            converter = converter.api_key(api_key);
        }
        let converter = converter.build()?;

        let embedder = OpenAiEmbedder::new(
            &self.embeddings_url,
            self.embeddings_api_key.clone(),
            &self.embedding_model,
            self.embedding_dimension,
        );

        let mut store = MilvusVectorStore::builder()
            .base_url(&self.milvus_url)
            .collection(&self.collection);
        if let Some(token) = &self.milvus_token {
            store = store.token(token);
        }
        let store = store.build()?;

        let mut chat = OpenAiCompatibleClient::builder()
            .base_url(&self.chat_url)
            .model(&self.chat_model);
        if let Some(api_key) = &self.chat_api_key {
            chat = chat.api_key(api_key);
        }
        let chat = chat.build()?;

        Ok(Pipeline::new(
            converter,
            embedder,
            store,
            chat,
            PipelineConfig {
                top_k: self.top_k,
                require_accelerator: self.require_accelerator,
            },
        ))
    }
}

use ragline_convert::{DocumentConverter, DocumentInfo, DocumentSource};
use ragline_core::{Record, SearchResult, TextEmbedder, VectorStore};
use ragline_llm::{ChatModel, Message};
use ragline_prompt::rag_prompt;

use crate::PipelineError;

pub const DEFAULT_TOP_K: usize = 3;

#[derive(Clone, Debug)]
pub struct PipelineConfig {
    /// Result limit for similarity search.
    pub top_k: usize,
    /// Fail ingestion early when the converter reports no accelerator.
    pub require_accelerator: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            require_accelerator: false,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct IngestReport {
    pub document: DocumentInfo,
    pub chunks: usize,
    pub records_inserted: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Answer {
    pub text: String,
    pub contexts: Vec<SearchResult>,
}

/// The sequential orchestration: every step blocks on one external
/// call before the next begins, and every failure propagates.
pub struct Pipeline<C, E, S, L> {
    converter: C,
    embedder: E,
    store: S,
    chat: L,
    config: PipelineConfig,
}

impl<C, E, S, L> Pipeline<C, E, S, L>
where
    C: DocumentConverter,
    E: TextEmbedder,
    S: VectorStore,
    L: ChatModel,
{
    pub fn new(converter: C, embedder: E, store: S, chat: L, config: PipelineConfig) -> Self {
        Self {
            converter,
            embedder,
            store,
            chat,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Converts and chunks the document, drops and recreates the
    /// collection, embeds each chunk, and inserts the whole batch once.
    ///
    /// Record ids are assigned in chunk order as 0..n, so the inserted
    /// record count always equals the chunk count.
    pub async fn ingest(&self, source: &DocumentSource) -> Result<IngestReport, PipelineError> {
        if self.config.require_accelerator {
            let health = self.converter.health().await?;
            if health.accelerator.is_none() {
                return Err(PipelineError::AcceleratorUnavailable);
            }
        }

        let conversion = self.converter.convert(source).await?;
        tracing::info!(
            document = %conversion.document.name,
            chunks = conversion.chunks.len(),
            "document converted"
        );

        self.store.drop_collection().await?;
        self.store
            .create_collection(self.embedder.dimension())
            .await?;

        let mut records = Vec::with_capacity(conversion.chunks.len());
        for (index, chunk) in conversion.chunks.iter().enumerate() {
            let vector = self.embedder.embed(chunk).await?;
            records.push(Record {
                id: index as i64,
                vector,
                text: chunk.clone(),
            });
        }

        let records_inserted = records.len();
        self.store.insert(records).await?;
        tracing::info!(records_inserted, "ingestion complete");

        Ok(IngestReport {
            document: conversion.document,
            chunks: conversion.chunks.len(),
            records_inserted,
        })
    }

    /// Embeds the question, retrieves the top-k passages, assembles the
    /// grounding prompt and requests one completion.
    pub async fn answer(&self, question: &str) -> Result<Answer, PipelineError> {
        let query = self.embedder.embed(question).await?;
        let contexts = self.store.search(&query, self.config.top_k).await?;
        tracing::debug!(retrieved = contexts.len(), "similarity search complete");

        let passages: Vec<String> = contexts
            .iter()
            .map(|result| result.text.clone())
            .collect();
        let prompt = rag_prompt(question, &passages)?;

        let text = self.chat.complete(&[Message::user(prompt)]).await?;
        Ok(Answer { text, contexts })
    }
}

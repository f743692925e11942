use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ragline::{
    Answer, ChatModel, Conversion, DocumentConverter, DocumentInfo, DocumentSource,
    InMemoryVectorStore, Message, Pipeline, PipelineConfig, PipelineError, TextEmbedder,
};
use ragline_convert::{ConvertError, ServiceHealth};
use ragline_core::EmbedError;
use ragline_llm::CompletionError;

const FNV_OFFSET: u64 = 14695981039346656037;
const FNV_PRIME: u64 = 1099511628211;

fn fnv1a(bytes: &[u8], seed: u64) -> u64 {
    let mut hash = FNV_OFFSET ^ seed;
    for byte in bytes {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Deterministic embedder; identical text always maps to the same vector.
#[derive(Clone)]
struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn hash_to_vec(&self, text: &str) -> Vec<f32> {
        let bytes = text.as_bytes();
        (0..self.dimension)
            .map(|idx| (fnv1a(bytes, idx as u64) % 10_000) as f32 / 10_000.0)
            .collect()
    }
}

#[async_trait]
impl TextEmbedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        Ok(self.hash_to_vec(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedError> {
        Ok(texts.iter().map(|text| self.hash_to_vec(text)).collect())
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[derive(Clone)]
struct FakeConverter {
    chunks: Vec<String>,
    accelerator: Option<String>,
}

impl FakeConverter {
    fn with_chunks(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|chunk| chunk.to_string()).collect(),
            accelerator: Some("cuda".to_string()),
        }
    }

    fn without_accelerator(mut self) -> Self {
        self.accelerator = None;
        self
    }
}

#[async_trait]
impl DocumentConverter for FakeConverter {
    async fn convert(&self, _source: &DocumentSource) -> Result<Conversion, ConvertError> {
        Ok(Conversion {
            document: DocumentInfo {
                name: "report.pdf".to_string(),
                pages: Some(2),
            },
            chunks: self.chunks.clone(),
        })
    }

    async fn health(&self) -> Result<ServiceHealth, ConvertError> {
        Ok(ServiceHealth {
            status: "ok".to_string(),
            accelerator: self.accelerator.clone(),
        })
    }
}

#[derive(Clone)]
struct CapturingChat {
    last_prompt: Arc<Mutex<Option<String>>>,
    reply: String,
}

impl CapturingChat {
    fn new(reply: &str) -> Self {
        Self {
            last_prompt: Arc::new(Mutex::new(None)),
            reply: reply.to_string(),
        }
    }

    fn prompt(&self) -> String {
        self.last_prompt.lock().unwrap().clone().expect("no prompt captured")
    }
}

#[async_trait]
impl ChatModel for CapturingChat {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        let prompt = messages
            .last()
            .map(|message| message.content.clone())
            .unwrap_or_default();
        *self.last_prompt.lock().unwrap() = Some(prompt);
        Ok(self.reply.clone())
    }
}

fn pipeline(
    converter: FakeConverter,
    store: InMemoryVectorStore,
    chat: CapturingChat,
    config: PipelineConfig,
) -> Pipeline<FakeConverter, HashEmbedder, InMemoryVectorStore, CapturingChat> {
    Pipeline::new(converter, HashEmbedder::new(4), store, chat, config)
}

fn source() -> DocumentSource {
    DocumentSource::Url("https://example.com/report.pdf".to_string())
}

#[tokio::test]
async fn ingest_inserts_one_record_per_chunk() {
    let store = InMemoryVectorStore::new("docs");
    let pipeline = pipeline(
        FakeConverter::with_chunks(&["alpha", "beta", "gamma", "delta"]),
        store.clone(),
        CapturingChat::new("ok"),
        PipelineConfig::default(),
    );

    let report = pipeline.ingest(&source()).await.unwrap();
    assert_eq!(report.chunks, 4);
    assert_eq!(report.records_inserted, 4);
    assert_eq!(store.records().await.len(), 4);
}

#[tokio::test]
async fn ingest_assigns_sequential_ids_from_zero() {
    let store = InMemoryVectorStore::new("docs");
    let pipeline = pipeline(
        FakeConverter::with_chunks(&["alpha", "beta", "gamma"]),
        store.clone(),
        CapturingChat::new("ok"),
        PipelineConfig::default(),
    );

    pipeline.ingest(&source()).await.unwrap();

    let records = store.records().await;
    let ids: Vec<i64> = records.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![0, 1, 2]);
    let texts: Vec<&str> = records.iter().map(|record| record.text.as_str()).collect();
    assert_eq!(texts, vec!["alpha", "beta", "gamma"]);
}

#[tokio::test]
async fn reingest_yields_identical_record_count() {
    let store = InMemoryVectorStore::new("docs");
    let pipeline = pipeline(
        FakeConverter::with_chunks(&["alpha", "beta"]),
        store.clone(),
        CapturingChat::new("ok"),
        PipelineConfig::default(),
    );

    let first = pipeline.ingest(&source()).await.unwrap();
    let second = pipeline.ingest(&source()).await.unwrap();

    assert_eq!(first.records_inserted, second.records_inserted);
    assert_eq!(store.records().await.len(), first.records_inserted);
}

#[tokio::test]
async fn answer_prompt_contains_question_and_joined_contexts() {
    let store = InMemoryVectorStore::new("docs");
    let chat = CapturingChat::new("the answer");
    let pipeline = pipeline(
        FakeConverter::with_chunks(&["alpha", "beta", "gamma"]),
        store,
        chat.clone(),
        PipelineConfig {
            top_k: 3,
            ..PipelineConfig::default()
        },
    );

    pipeline.ingest(&source()).await.unwrap();
    let answer = pipeline.answer("which greek letter?").await.unwrap();
    assert_eq!(answer.text, "the answer");
    assert_eq!(answer.contexts.len(), 3);

    let prompt = chat.prompt();
    assert!(prompt.contains("which greek letter?"));

    let joined: Vec<String> = answer
        .contexts
        .iter()
        .map(|context| context.text.clone())
        .collect();
    assert!(prompt.contains(&joined.join("\n")));
}

#[tokio::test]
async fn answer_returns_top_k_contexts_in_non_increasing_score_order() {
    let store = InMemoryVectorStore::new("docs");
    let pipeline = pipeline(
        FakeConverter::with_chunks(&["alpha", "beta", "gamma", "delta", "epsilon"]),
        store,
        CapturingChat::new("ok"),
        PipelineConfig {
            top_k: 2,
            ..PipelineConfig::default()
        },
    );

    pipeline.ingest(&source()).await.unwrap();
    let Answer { contexts, .. } = pipeline.answer("alpha").await.unwrap();

    assert_eq!(contexts.len(), 2);
    assert!(contexts
        .windows(2)
        .all(|pair| pair[0].score >= pair[1].score));
}

#[tokio::test]
async fn answer_returns_fewer_contexts_when_collection_is_small() {
    let store = InMemoryVectorStore::new("docs");
    let pipeline = pipeline(
        FakeConverter::with_chunks(&["only chunk"]),
        store,
        CapturingChat::new("ok"),
        PipelineConfig {
            top_k: 5,
            ..PipelineConfig::default()
        },
    );

    pipeline.ingest(&source()).await.unwrap();
    let answer = pipeline.answer("anything").await.unwrap();
    assert_eq!(answer.contexts.len(), 1);
}

#[tokio::test]
async fn ingest_fails_early_without_required_accelerator() {
    let store = InMemoryVectorStore::new("docs");
    let pipeline = pipeline(
        FakeConverter::with_chunks(&["alpha"]).without_accelerator(),
        store.clone(),
        CapturingChat::new("ok"),
        PipelineConfig {
            require_accelerator: true,
            ..PipelineConfig::default()
        },
    );

    let err = pipeline.ingest(&source()).await.unwrap_err();
    assert!(matches!(err, PipelineError::AcceleratorUnavailable));
    assert!(store.records().await.is_empty());
}

#[tokio::test]
async fn ingest_skips_preflight_when_not_required() {
    let store = InMemoryVectorStore::new("docs");
    let pipeline = pipeline(
        FakeConverter::with_chunks(&["alpha"]).without_accelerator(),
        store,
        CapturingChat::new("ok"),
        PipelineConfig::default(),
    );

    let report = pipeline.ingest(&source()).await.unwrap();
    assert_eq!(report.records_inserted, 1);
}

use ragline_convert::ConvertError;
use ragline_core::{EmbedError, StoreError};
use ragline_llm::CompletionError;
use ragline_prompt::PromptError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no compute accelerator available on the converter service")]
    AcceleratorUnavailable,
    #[error("conversion failed: {0}")]
    Convert(#[from] ConvertError),
    #[error("embedding failed: {0}")]
    Embed(#[from] EmbedError),
    #[error("vector store operation failed: {0}")]
    Store(#[from] StoreError),
    #[error("prompt assembly failed: {0}")]
    Prompt(#[from] PromptError),
    #[error("answer generation failed: {0}")]
    Completion(#[from] CompletionError),
}

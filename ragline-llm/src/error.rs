use thiserror::Error;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("invalid configuration: base_url is required")]
    MissingBaseUrl,
    #[error("invalid configuration: base_url cannot be empty")]
    EmptyBaseUrl,
    #[error("invalid configuration: model is required")]
    MissingModel,
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("completion endpoint returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("completion response contained no choices")]
    EmptyChoices,
    #[error("invalid completion response: {message}")]
    InvalidResponse { message: String },
}

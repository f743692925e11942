use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("invalid configuration: base_url is required")]
    MissingBaseUrl,
    #[error("invalid configuration: base_url cannot be empty")]
    EmptyBaseUrl,
    #[error("converter request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("converter returned HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },
    #[error("invalid converter response: {message}")]
    InvalidResponse { message: String },
    #[error("no compute accelerator available on the converter service")]
    AcceleratorUnavailable,
}

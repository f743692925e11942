//! Client for the external document conversion and chunking service.
//!
//! The service owns parsing, layout analysis and chunking; this crate
//! only ships a source reference over HTTP and maps the response.

mod error;
mod wire;

use std::fmt;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;

pub use error::ConvertError;
use wire::{error_message, ConvertRequest, ConvertResponse, HealthResponse, SourcePayload};

/// Where the document lives; the service fetches it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DocumentSource {
    Path(PathBuf),
    Url(String),
}

impl fmt::Display for DocumentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentSource::Path(path) => write!(f, "{}", path.display()),
            DocumentSource::Url(url) => write!(f, "{url}"),
        }
    }
}

/// Summary of the normalized document; opaque beyond this.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentInfo {
    pub name: String,
    pub pages: Option<u32>,
}

/// A converted document together with its text chunks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Conversion {
    pub document: DocumentInfo,
    pub chunks: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServiceHealth {
    pub status: String,
    pub accelerator: Option<String>,
}

/// Converter seam used by the pipeline; [`ConverterClient`] is the
/// HTTP implementation.
#[async_trait]
pub trait DocumentConverter: Send + Sync {
    async fn convert(&self, source: &DocumentSource) -> Result<Conversion, ConvertError>;

    async fn health(&self) -> Result<ServiceHealth, ConvertError>;
}

#[derive(Clone)]
pub struct ConverterClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl fmt::Debug for ConverterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("ConverterClient")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .finish()
    }
}

#[derive(Default, Clone, Debug)]
pub struct ConverterClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
}

impl ConverterClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, value: impl Into<String>) -> Self {
        self.base_url = Some(value.into());
        self
    }

    pub fn api_key(mut self, value: impl Into<String>) -> Self {
        let value = value.into();
        self.api_key = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    pub fn build(self) -> Result<ConverterClient, ConvertError> {
        let base_url = self.base_url.ok_or(ConvertError::MissingBaseUrl)?;
        if base_url.trim().is_empty() {
            return Err(ConvertError::EmptyBaseUrl);
        }

        Ok(ConverterClient {
            client: reqwest::Client::new(),
            base_url,
            api_key: self.api_key,
        })
    }
}

impl ConverterClient {
    pub fn builder() -> ConverterClientBuilder {
        ConverterClientBuilder::new()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fails early with a clear message when the service reports no
    /// compute accelerator.
    pub async fn ensure_accelerator(&self) -> Result<String, ConvertError> {
        let health = self.health().await?;
        match health.accelerator {
            Some(device) => Ok(device),
            None => Err(ConvertError::AcceleratorUnavailable),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request_builder(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let request = self.client.request(method, self.endpoint(path));

        if let Some(api_key) = self.api_key.as_deref() {
            request.bearer_auth(api_key)
        } else {
            request
        }
    }

    async fn send_and_decode<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ConvertError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ConvertError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        serde_json::from_str(&body).map_err(|err| ConvertError::InvalidResponse {
            message: format!("failed to decode converter response body: {err}"),
        })
    }
}

#[async_trait]
impl DocumentConverter for ConverterClient {
    async fn convert(&self, source: &DocumentSource) -> Result<Conversion, ConvertError> {
        tracing::debug!(source = %source, "converting document");

        let request = ConvertRequest {
            source: SourcePayload::from(source),
        };
        let response: ConvertResponse = self
            .send_and_decode(
                self.request_builder(reqwest::Method::POST, "v1/convert")
                    .json(&request),
            )
            .await?;

        tracing::debug!(
            document = %response.document.name,
            chunks = response.chunks.len(),
            "document converted"
        );
        Ok(response.into())
    }

    async fn health(&self) -> Result<ServiceHealth, ConvertError> {
        let response: HealthResponse = self
            .send_and_decode(self.request_builder(reqwest::Method::GET, "health"))
            .await?;
        Ok(response.into())
    }
}

mod error;
mod types;
mod wire;

use std::fmt;

use async_trait::async_trait;

pub use error::CompletionError;
pub use types::{Message, Role};
use wire::{error_message, ChatCompletionRequest, ChatCompletionResponse};

/// A completion endpoint: role-tagged messages in, generated text out.
/// One blocking call, no streaming, no retry.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError>;
}

/// Client for any provider speaking OpenAI's chat-completions format.
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<none>"
        };

        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &api_key)
            .finish()
    }
}

#[derive(Default, Clone, Debug)]
pub struct OpenAiCompatibleBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
}

impl OpenAiCompatibleBuilder {
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

    pub fn model(mut self, value: impl Into<String>) -> Self {
        self.model = Some(value.into());
        self
    }

    pub fn build(self) -> Result<OpenAiCompatibleClient, CompletionError> {
        let base_url = self.base_url.ok_or(CompletionError::MissingBaseUrl)?;
        if base_url.trim().is_empty() {
            return Err(CompletionError::EmptyBaseUrl);
        }
        let model = self.model.ok_or(CompletionError::MissingModel)?;

        Ok(OpenAiCompatibleClient {
            client: reqwest::Client::new(),
            base_url,
            api_key: self.api_key,
            model,
        })
    }
}

impl OpenAiCompatibleClient {
    pub fn builder() -> OpenAiCompatibleBuilder {
        OpenAiCompatibleBuilder::new()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatibleClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, CompletionError> {
        tracing::debug!(model = %self.model, messages = messages.len(), "requesting completion");

        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            stream: false,
        };

        let mut builder = self.client.post(url).json(&request);
        if let Some(api_key) = self.api_key.as_deref() {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(CompletionError::HttpStatus {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let decoded: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|err| CompletionError::InvalidResponse {
                message: format!("failed to decode completion response body: {err}"),
            })?;

        let choice = decoded
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyChoices)?;

        choice
            .message
            .content
            .ok_or_else(|| CompletionError::InvalidResponse {
                message: "completion message has no content".to_string(),
            })
    }
}

use serde::{Deserialize, Serialize};

use crate::{Conversion, DocumentInfo, DocumentSource, ServiceHealth};

#[derive(Debug, Clone, Serialize)]
pub struct ConvertRequest {
    pub source: SourcePayload,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "location", rename_all = "lowercase")]
pub enum SourcePayload {
    Path(String),
    Url(String),
}

impl From<&DocumentSource> for SourcePayload {
    fn from(source: &DocumentSource) -> Self {
        match source {
            DocumentSource::Path(path) => {
                SourcePayload::Path(path.to_string_lossy().to_string())
            }
            DocumentSource::Url(url) => SourcePayload::Url(url.clone()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ConvertResponse {
    pub document: DocumentPayload,
    pub chunks: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentPayload {
    pub name: String,
    #[serde(default)]
    pub pages: Option<u32>,
}

impl From<ConvertResponse> for Conversion {
    fn from(response: ConvertResponse) -> Self {
        Conversion {
            document: DocumentInfo {
                name: response.document.name,
                pages: response.document.pages,
            },
            chunks: response.chunks,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub accelerator: Option<String>,
}

impl From<HealthResponse> for ServiceHealth {
    fn from(response: HealthResponse) -> Self {
        ServiceHealth {
            status: response.status,
            accelerator: response.accelerator,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

pub fn error_message(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "unknown converter error".to_string();
    }

    serde_json::from_str::<ErrorEnvelope>(trimmed)
        .map(|envelope| envelope.error)
        .unwrap_or_else(|_| trimmed.to_string())
}

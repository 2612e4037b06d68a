//! Outbound calls to the QR generation backend.
//!
//! [`QrBackend`] is the seam between the fallback loop and the network.
//! [`HttpBackend`] is the production implementation: a single POST per
//! call with an empty JSON body and a bounded wait. Any 2xx answer counts
//! as a success.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::core::targets::BackendTarget;

/// Per-attempt wait when nothing else is configured.
pub const DEFAULT_BACKEND_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Network failure, DNS failure or timeout.
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status.
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: Option<JsonValue> },

    #[error("Invalid backend target: {0}")]
    InvalidTarget(#[from] url::ParseError),
}

impl BackendError {
    /// Structured payload sent along with a failed response, if any.
    pub fn payload(&self) -> Option<&JsonValue> {
        match self {
            BackendError::Status { body, .. } => body.as_ref(),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Request(e) if e.is_timeout())
    }
}

#[async_trait]
pub trait QrBackend: Send + Sync {
    /// Asks one target to generate a QR code for `url`.
    async fn generate(&self, target: &BackendTarget, url: &str) -> Result<JsonValue, BackendError>;
}

pub struct HttpBackend {
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(timeout: Duration) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl QrBackend for HttpBackend {
    async fn generate(&self, target: &BackendTarget, url: &str) -> Result<JsonValue, BackendError> {
        let endpoint = target.generate_url(url)?;

        let response = self
            .client
            .post(endpoint)
            .json(&serde_json::json!({}))
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status: status.as_u16(),
                body: error_payload(&bytes),
            });
        }

        // Any 2xx ends the fallback, whatever the body looks like.
        Ok(success_body(&bytes))
    }
}

/// JSON bodies are passed through, anything else as a JSON string.
pub(crate) fn success_body(bytes: &[u8]) -> JsonValue {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| JsonValue::String(String::from_utf8_lossy(bytes).into_owned()))
}

/// JSON error bodies are kept as-is, anything else non-empty as a string.
fn error_payload(bytes: &[u8]) -> Option<JsonValue> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    Some(success_body(bytes))
}

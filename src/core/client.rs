//! The page's side of the proxy call.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use url::Url;

use crate::core::backend::success_body;
use crate::core::targets::GENERATE_PATH;

pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("{0}")]
    Request(#[from] reqwest::Error),

    /// The proxy answered with an error status. `error` is the `error`
    /// field of its JSON body when present.
    #[error("Request failed with status code {status}")]
    Server { status: u16, error: Option<String> },
}

impl ClientError {
    /// The server's `error` field when it sent one, the transport message
    /// otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server {
                error: Some(error), ..
            } if !error.is_empty() => error.clone(),
            other => other.to_string(),
        }
    }
}

#[async_trait]
pub trait ProxyClient: Send + Sync {
    async fn generate(&self, url: &str) -> Result<JsonValue, ClientError>;
}

/// Calls the proxy endpoint over HTTP, the way a browser would.
pub struct HttpProxyClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpProxyClient {
    pub fn new(proxy_base: &str, timeout: Duration) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "{}/{}",
            proxy_base.trim_end_matches('/'),
            GENERATE_PATH
        ))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProxyClient for HttpProxyClient {
    async fn generate(&self, url: &str) -> Result<JsonValue, ClientError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[("url", url)])
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let error = serde_json::from_slice::<JsonValue>(&bytes)
                .ok()
                .and_then(|body| body.get("error").and_then(JsonValue::as_str).map(String::from));
            return Err(ClientError::Server {
                status: status.as_u16(),
                error,
            });
        }

        // A non-JSON success still counts; the page finds no image in it.
        Ok(success_body(&bytes))
    }
}

//! Sequential fallback across the candidate backend targets.

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::core::backend::{BackendError, QrBackend};
use crate::core::targets::BackendTarget;

pub const URL_REQUIRED: &str = "URL is required";
pub const GENERATION_FAILED: &str = "Failed to generate QR Code";

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("URL is required")]
    UrlRequired,

    #[error("No backend targets configured")]
    NoTargets,

    /// Every target was tried; `last` is the failure of the final one.
    #[error("Failed to generate QR Code")]
    AllTargetsFailed { attempts: usize, last: BackendError },
}

impl GatewayError {
    /// Message of the failure that ended the attempt chain.
    pub fn details(&self) -> String {
        match self {
            GatewayError::AllTargetsFailed { last, .. } => last.to_string(),
            other => other.to_string(),
        }
    }

    pub fn backend_payload(&self) -> Option<&JsonValue> {
        match self {
            GatewayError::AllTargetsFailed { last, .. } => last.payload(),
            _ => None,
        }
    }
}

pub struct QrGateway {
    backend: Arc<dyn QrBackend>,
    targets: Vec<BackendTarget>,
}

impl QrGateway {
    pub fn new(backend: Arc<dyn QrBackend>, targets: Vec<BackendTarget>) -> Self {
        Self { backend, targets }
    }

    pub fn targets(&self) -> &[BackendTarget] {
        &self.targets
    }

    /// Forwards `url` to the first target that answers successfully.
    ///
    /// Targets are tried strictly one after another, in order. The first
    /// success is returned untouched and the remaining targets are skipped.
    pub async fn generate(&self, url: Option<&str>) -> Result<JsonValue, GatewayError> {
        tracing::info!("Received URL: {:?}", url);

        let url = match url {
            Some(url) if !url.is_empty() => url,
            _ => return Err(GatewayError::UrlRequired),
        };

        let mut last: Option<BackendError> = None;

        for (attempt, target) in self.targets.iter().enumerate() {
            tracing::debug!(attempt = attempt + 1, backend = %target, "Trying backend target");

            match self.backend.generate(target, url).await {
                Ok(body) => {
                    tracing::debug!(backend = %target, body = %body, "Backend response");
                    return Ok(body);
                }
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        backend = %target,
                        timeout = e.is_timeout(),
                        error = %e,
                        "Backend target failed"
                    );
                    last = Some(e);
                }
            }
        }

        match last {
            Some(last) => {
                tracing::error!(
                    url,
                    error = %last,
                    backend_error = ?last.payload(),
                    "Error generating QR Code"
                );
                Err(GatewayError::AllTargetsFailed {
                    attempts: self.targets.len(),
                    last,
                })
            }
            None => Err(GatewayError::NoTargets),
        }
    }
}

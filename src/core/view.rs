use serde_json::Value as JsonValue;

use crate::core::client::{ClientError, ProxyClient};
use crate::core::image_ref::extract_image_reference;

pub const NO_IMAGE_RETURNED: &str = "QR Code generated but no image URL returned";

/// Everything the generator page renders from.
///
/// `image` and `error` are empty when there is nothing to show.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub input: String,
    pub image: String,
    pub error: String,
    pub busy: bool,
}

impl ViewState {
    pub fn with_input(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            ..Self::default()
        }
    }

    /// idle -> busy
    pub fn begin(&mut self) {
        self.error.clear();
        self.image.clear();
        self.busy = true;
    }

    /// busy -> success | error -> idle
    pub fn finish(&mut self, outcome: Result<JsonValue, ClientError>) {
        match outcome {
            Ok(body) => match extract_image_reference(&body) {
                Some(image) => self.image = image.src,
                None => self.error = NO_IMAGE_RETURNED.to_string(),
            },
            Err(e) => {
                tracing::error!(error = %e, "Error generating QR Code");
                self.error = e.user_message();
            }
        }
        self.busy = false;
    }

    pub async fn submit(&mut self, client: &dyn ProxyClient) {
        tracing::info!("Generating QR for URL: {}", self.input);
        self.begin();
        let outcome = client.generate(&self.input).await;
        self.finish(outcome);
    }
}

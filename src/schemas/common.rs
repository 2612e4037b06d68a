use poem_openapi::Object;
use serde_json::Value as JsonValue;

use crate::core::gateway::{GENERATION_FAILED, GatewayError};

#[derive(Object, Debug)]
pub struct BadRequestResponse {
    pub error: String,
}

impl BadRequestResponse {
    pub fn new(error: &str) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

#[derive(Object, Debug)]
pub struct InternalServerErrorResponse {
    pub error: String,
    /// Message of the last failed attempt.
    pub details: String,
    /// Body the last failing backend answered with, when it sent one.
    #[oai(skip_serializing_if_is_none)]
    pub backend_error: Option<JsonValue>,
}

impl From<&GatewayError> for InternalServerErrorResponse {
    fn from(err: &GatewayError) -> Self {
        Self {
            error: GENERATION_FAILED.to_string(),
            details: err.details(),
            backend_error: err.backend_payload().cloned(),
        }
    }
}

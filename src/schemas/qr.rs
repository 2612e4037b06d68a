use poem_openapi::{ApiResponse, Object, payload::Json};
use serde_json::Value as JsonValue;

use super::common::{BadRequestResponse, InternalServerErrorResponse};

#[derive(ApiResponse)]
pub enum GenerateQrResponse {
    /// Backend body, passed through untouched. Expected to carry
    /// `qr_code_url` or `qr_code`.
    #[oai(status = 200, content_type = "application/json")]
    Ok(Json<JsonValue>),

    #[oai(status = 400)]
    BadRequest(Json<BadRequestResponse>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(Object)]
pub struct HealthResponse {
    pub status: String,
    /// Backend base URLs in fallback order.
    pub targets: Vec<String>,
    pub backend_timeout_secs: u64,
    pub client_timeout_secs: u64,
}

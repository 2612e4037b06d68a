use std::sync::Arc;

use poem::web::Data;
use poem_openapi::{OpenApi, Tags, param::Query, payload::Json};

use crate::{
    AppState,
    core::gateway::{GatewayError, URL_REQUIRED},
    schemas::{
        common::{BadRequestResponse, InternalServerErrorResponse},
        qr::{GenerateQrResponse, HealthResponse},
    },
};

#[derive(Tags)]
enum ApiQrTags {
    Qr,
}

pub struct ApiQr;

impl ApiQr {
    async fn handle(state: &AppState, url: Option<String>) -> GenerateQrResponse {
        match state.gateway.generate(url.as_deref()).await {
            Ok(body) => GenerateQrResponse::Ok(Json(body)),
            Err(GatewayError::UrlRequired) => {
                GenerateQrResponse::BadRequest(Json(BadRequestResponse::new(URL_REQUIRED)))
            }
            Err(e) => GenerateQrResponse::InternalServerError(Json(
                InternalServerErrorResponse::from(&e),
            )),
        }
    }
}

#[OpenApi()]
impl ApiQr {
    /// Generate QR Code
    ///
    /// Forwards `url` to the QR backend, trying each configured backend
    /// address in order, and returns the first successful answer as is.
    #[oai(path = "/generate-qr", method = "get", tag = "ApiQrTags::Qr")]
    async fn generate_qr(
        &self,
        url: Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> GenerateQrResponse {
        Self::handle(&state, url.0).await
    }

    /// Generate QR Code (POST)
    ///
    /// Same as the GET variant. The request body is ignored.
    #[oai(path = "/generate-qr", method = "post", tag = "ApiQrTags::Qr")]
    async fn generate_qr_post(
        &self,
        url: Query<Option<String>>,
        state: Data<&Arc<AppState>>,
    ) -> GenerateQrResponse {
        Self::handle(&state, url.0).await
    }

    #[oai(path = "/health", method = "get")]
    async fn health(&self, state: Data<&Arc<AppState>>) -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_string(),
            targets: state
                .gateway
                .targets()
                .iter()
                .map(|target| target.to_string())
                .collect(),
            backend_timeout_secs: state.config.backend_timeout().as_secs(),
            client_timeout_secs: state.config.client_timeout().as_secs(),
        })
    }
}

use std::sync::Arc;

use anyhow::Result;
use poem::{
    EndpointExt, Route, get,
    middleware::{AddData, AddDataEndpoint, Cors, CorsEndpoint},
};
use poem_openapi::OpenApiService;

use crate::core::backend::HttpBackend;
use crate::core::client::{HttpProxyClient, ProxyClient};
use crate::core::gateway::QrGateway;
use crate::routes::{page, qr::ApiQr};
use crate::settings::Config;

pub mod core;
pub mod routes;
pub mod schemas;
pub mod settings;

pub struct AppState {
    pub gateway: Arc<QrGateway>,
    pub proxy: Arc<dyn ProxyClient>,
    pub config: Config,
}

impl AppState {
    /// Wires the real HTTP backend and proxy client from configuration.
    pub fn from_config(config: Config) -> Result<Self> {
        let targets = config.targets()?;
        let backend = HttpBackend::new(config.backend_timeout())?;
        let proxy = HttpProxyClient::new(&config.proxy_base_url(), config.client_timeout())?;

        Ok(Self {
            gateway: Arc::new(QrGateway::new(Arc::new(backend), targets)),
            proxy: Arc::new(proxy),
            config,
        })
    }
}

pub fn init_openapi_route(
    app_state: Arc<AppState>,
    config: &Config,
) -> CorsEndpoint<AddDataEndpoint<Route, Arc<AppState>>> {
    let prefix = config.prefix();
    let openapi_route =
        OpenApiService::new(ApiQr, "QR Gateway API", "1.0").server(prefix.clone());

    let openapi_json_endpoint = openapi_route.spec_endpoint();
    let ui = openapi_route.swagger_ui();
    Route::new()
        .at("/", get(page::index))
        .nest(prefix, openapi_route)
        .nest("/docs", ui)
        .at("openapi.json", openapi_json_endpoint)
        .with(AddData::new(app_state))
        .with(Cors::new())
}

use poem::listener::TcpListener;
use qr_gateway::settings::get_config;
use qr_gateway::{AppState, init_openapi_route};

use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = get_config()?;

    // Logging to File when a directory is configured, stdout otherwise
    let _guard = match &config.log_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "app.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            tracing_subscriber::fmt()
                .with_writer(non_blocking)
                .with_max_level(config.log_level())
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_max_level(config.log_level())
                .with_target(false)
                .init();
            None
        }
    };

    tracing::info!("Initializing QR Gateway...");
    tracing::info!("run with config: {:?}", config);

    let app_state = Arc::new(AppState::from_config(config.clone())?);

    let targets = app_state.gateway.targets().len();
    if config.client_gives_up_early(targets) {
        tracing::warn!(
            client_timeout = ?config.client_timeout(),
            worst_case_backend_wait = ?config.worst_case_backend_wait(targets),
            "page timeout is shorter than trying every backend target; \
             the page may report a timeout while the proxy is still falling back"
        );
    }

    let app = init_openapi_route(app_state.clone(), &config);
    tracing::info!("run server on {}:{}", config.host, config.port);
    poem::Server::new(TcpListener::bind(format!(
        "{}:{}",
        config.host, config.port
    )))
    .run(app)
    .await?;

    Ok(())
}

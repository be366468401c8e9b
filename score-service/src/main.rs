use score_service::config::ScoreServiceConfig;
use score_service::startup::Application;
use score_service::SERVICE_NAME;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = match ScoreServiceConfig::load() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(SERVICE_NAME, "info", None);
            tracing::error!("Failed to load configuration: {:#}", e);
            return Err(std::io::Error::other(format!("Configuration error: {}", e)));
        }
    };

    init_tracing(
        SERVICE_NAME,
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!("Servidor escuchando en el puerto {}", application.port());

    let result = application.run_until_stopped().await;
    shutdown_tracing();
    result
}

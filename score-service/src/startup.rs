//! Application startup and lifecycle management.
//!
//! Builds the score store and quiz generator once, binds the listener, and
//! serves until a shutdown signal arrives.

use crate::config::{ScoreServiceConfig, StoreBackend, StoreConfig};
use crate::services::providers::gemini::{GeminiConfig, GeminiTextProvider};
use crate::services::providers::TextProvider;
use crate::services::{
    InMemoryScoreStore, MongoScoreStore, QuizGenerator, ScoreStore, UnavailableScoreStore,
};
use crate::{build_router, AppState};
use service_core::error::AppError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;

/// Creates the configured score store.
///
/// Never fails: a missing or unusable MongoDB configuration is logged and
/// yields a store whose calls fail, so the server still starts.
pub async fn build_score_store(config: &StoreConfig) -> Arc<dyn ScoreStore> {
    match config.backend {
        StoreBackend::Memory => {
            tracing::info!("Using in-memory score store");
            Arc::new(InMemoryScoreStore::new())
        }
        StoreBackend::MongoDb => {
            let Some(uri) = config.mongodb_uri.as_deref() else {
                tracing::error!("MongoDB connection string is not set; score requests will fail");
                return Arc::new(UnavailableScoreStore::new(
                    "MongoDB connection string is not configured",
                ));
            };

            match MongoScoreStore::connect(uri, &config.database).await {
                Ok(store) => {
                    let probe = store.clone();
                    tokio::spawn(async move {
                        match probe.health_check().await {
                            Ok(()) => tracing::info!("MongoDB connection established"),
                            Err(e) => tracing::error!("Failed to connect to MongoDB: {}", e),
                        }
                    });
                    Arc::new(store)
                }
                Err(e) => {
                    tracing::error!("Failed to connect to MongoDB: {}", e);
                    Arc::new(UnavailableScoreStore::new(e.to_string()))
                }
            }
        }
    }
}

/// Builds the shared state from configuration.
pub async fn build_state(config: &ScoreServiceConfig) -> Result<AppState, AppError> {
    let scores = build_score_store(&config.store).await;

    let provider = GeminiTextProvider::new(GeminiConfig::from(&config.gemini))
        .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?;
    if config.gemini.api_key.is_none() {
        tracing::warn!("Gemini API key is not set; quiz generation will fail");
    }
    tracing::info!(model = %config.gemini.model, "Initialized Gemini text provider");

    let text_provider: Arc<dyn TextProvider> = Arc::new(provider);
    let quiz = QuizGenerator::new(text_provider).with_strict_format(config.quiz.strict_format);

    Ok(AppState { scores, quiz })
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: ScoreServiceConfig) -> Result<Self, AppError> {
        let state = build_state(&config).await?;
        Self::with_state(config.common.port, state).await
    }

    /// Bind `port` (0 picks a free port) and serve `state`.
    pub async fn with_state(port: u16, state: AppState) -> Result<Self, AppError> {
        let addr = SocketAddr::from(([0, 0, 0, 0], port));
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal is received.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

use axum::{extract::State, http::StatusCode, http::Uri, response::IntoResponse, Json};
use serde_json::json;
use service_core::error::AppError;

use crate::{AppState, SERVICE_NAME};

pub const LIVENESS_MESSAGE: &str = "¡El servidor de puntajes está funcionando!";

/// `GET /`: plain-text liveness message.
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// `GET /health`: reports whether the score store answers.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    match state.scores.health_check().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "ok",
                "service": SERVICE_NAME,
                "version": env!("CARGO_PKG_VERSION")
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "unhealthy",
                "service": SERVICE_NAME,
                "error": e.to_string()
            })),
        ),
    }
}

/// JSON 404 for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}

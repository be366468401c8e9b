use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use service_core::error::AppError;

use crate::dtos::{GenerateQuizRequest, GeneratedQuizResponse, MISSING_TOPIC};
use crate::AppState;

const GENERATION_FAILED: &str = "Error generando el quiz";

/// `POST /api/generar-quiz`: proxy a quiz prompt for the topic and relay the text.
#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    payload: Result<Json<GenerateQuizRequest>, JsonRejection>,
) -> Result<Json<GeneratedQuizResponse>, AppError> {
    let Json(request) = payload.map_err(|e| {
        AppError::BadRequest(anyhow::anyhow!("{} ({})", MISSING_TOPIC, e.body_text()))
    })?;

    let topic = request
        .topic()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!(MISSING_TOPIC)))?;

    let generated_text = state.quiz.generate(topic).await.map_err(|e| {
        tracing::error!(topic = %topic, error = %e, "Quiz generation failed");
        AppError::UpstreamError(anyhow::Error::new(e).context(GENERATION_FAILED))
    })?;

    Ok(Json(GeneratedQuizResponse { generated_text }))
}

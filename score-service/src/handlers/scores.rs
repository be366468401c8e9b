use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use service_core::error::AppError;

use crate::dtos::{SaveScoreRequest, MISSING_SCORE_FIELDS};
use crate::models::ScoreResponse;
use crate::AppState;

const LIST_FAILED: &str = "Error al obtener los puntajes";
const SAVE_FAILED: &str = "Error al guardar el puntaje";

/// `GET /api/scores`: every score, highest first.
pub async fn list_scores(
    State(state): State<AppState>,
) -> Result<Json<Vec<ScoreResponse>>, AppError> {
    let records = state
        .scores
        .list_all()
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::Error::new(e).context(LIST_FAILED)))?;

    Ok(Json(records.iter().map(|r| r.to_response()).collect()))
}

/// `POST /api/puntajes`: validate and persist one score.
#[axum::debug_handler]
pub async fn save_score(
    State(state): State<AppState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ScoreResponse>), AppError> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(anyhow::anyhow!(e.body_text())))?;

    tracing::info!(payload = %payload, "Score submission received");

    let request: SaveScoreRequest = serde_json::from_value(payload)
        .map_err(|e| AppError::BadRequest(anyhow::anyhow!("{} {}", MISSING_SCORE_FIELDS, e)))?;

    let new_score = request
        .into_new_score()
        .ok_or_else(|| AppError::BadRequest(anyhow::anyhow!(MISSING_SCORE_FIELDS)))?;
    new_score.check()?;

    let record = state
        .scores
        .insert(new_score)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::Error::new(e).context(SAVE_FAILED)))?;

    tracing::info!(
        score_id = %record.id,
        player = %record.player_name,
        score = record.score,
        "Score saved"
    );

    Ok((StatusCode::CREATED, Json(record.to_response())))
}

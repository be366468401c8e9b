pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::tracing::{make_request_span, request_id_middleware};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::services::{QuizGenerator, ScoreStore};

pub const SERVICE_NAME: &str = "score-service";

/// Shared application state. Built once at startup and cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub scores: Arc<dyn ScoreStore>,
    pub quiz: QuizGenerator,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/api/scores", get(handlers::list_scores))
        .route("/api/puntajes", post(handlers::save_score))
        .route("/api/generar-quiz", post(handlers::generate_quiz))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use score_service::services::providers::mock::MockTextProvider;
use score_service::services::providers::TextProvider;
use score_service::services::{InMemoryScoreStore, QuizGenerator, ScoreStore};
use score_service::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::util::ServiceExt;

/// Quiz text in the five-block format the prompt asks for.
pub const SAMPLE_QUIZ: &str = "[Q1] ¿Capital de Francia?\n[A] París\n[B] Roma\n[C] Madrid\n[D] Berlín\n[ANSWER] A\n---\n\
[Q2] ¿2 + 2?\n[A] 3\n[B] 4\n[C] 5\n[D] 6\n[ANSWER] B\n---\n\
[Q3] ¿Color del cielo?\n[A] Verde\n[B] Rojo\n[C] Azul\n[D] Negro\n[ANSWER] C\n---\n\
[Q4] ¿Planeta rojo?\n[A] Venus\n[B] Júpiter\n[C] Saturno\n[D] Marte\n[ANSWER] D\n---\n\
[Q5] ¿Autor del Quijote?\n[A] Cervantes\n[B] Lorca\n[C] Neruda\n[D] Borges\n[ANSWER] A";

pub struct TestApp {
    pub router: Router,
    pub store: InMemoryScoreStore,
}

impl TestApp {
    /// Router over an in-memory store and a provider that returns `SAMPLE_QUIZ`.
    pub fn new() -> Self {
        Self::with_provider(Arc::new(MockTextProvider::returning(SAMPLE_QUIZ)))
    }

    pub fn with_provider(provider: Arc<dyn TextProvider>) -> Self {
        let store = InMemoryScoreStore::new();
        let state = AppState {
            scores: Arc::new(store.clone()),
            quiz: QuizGenerator::new(provider),
        };

        Self {
            router: build_router(state),
            store,
        }
    }

    /// Router over an arbitrary store.
    pub fn with_store(scores: Arc<dyn ScoreStore>) -> Router {
        build_router(AppState {
            scores,
            quiz: QuizGenerator::new(Arc::new(MockTextProvider::returning(SAMPLE_QUIZ))),
        })
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(&self.router, get_request(uri)).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        send(&self.router, json_request(uri, body)).await
    }
}

pub fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Drives one request through the router and decodes the JSON body.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

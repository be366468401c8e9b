//! Text generation provider abstraction.
//!
//! Quiz generation talks to a `TextProvider`, so the Gemini backend can be
//! swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Unexpected response structure: {0}")]
    MalformedResponse(String),
}

/// Text extracted from a successful generation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    /// First text part of the first candidate, verbatim.
    pub text: String,
}

/// Trait for single-shot text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Send `prompt` as the only content of one request.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;
}

//! Mock provider implementation for testing.

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Mock text provider that replays a canned outcome and records prompts.
pub struct MockTextProvider {
    outcome: Result<String, ProviderError>,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            outcome: Err(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        self.prompts.lock().await.push(prompt.to_string());

        self.outcome.clone().map(|text| ProviderResponse { text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_returning_replays_text_and_records_prompts() {
        let provider = MockTextProvider::returning("quiz");

        let first = provider.generate("uno").await.unwrap();
        provider.generate("dos").await.unwrap();

        assert_eq!(
            first,
            ProviderResponse {
                text: "quiz".to_string()
            }
        );
        assert_eq!(provider.prompts().await, vec!["uno", "dos"]);
    }

    #[tokio::test]
    async fn test_failing_replays_error() {
        let provider = MockTextProvider::failing(ProviderError::RateLimited);

        assert_eq!(
            provider.generate("uno").await,
            Err(ProviderError::RateLimited)
        );
        assert_eq!(provider.prompts().await, vec!["uno"]);
    }
}

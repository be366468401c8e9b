//! Quiz generation on top of a text provider.

use super::providers::{ProviderError, TextProvider};
use super::quiz_format::{self, QuizFormatError, BLOCK_SEPARATOR, QUESTION_COUNT};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Generated quiz does not follow the expected format: {0}")]
    InvalidFormat(#[from] QuizFormatError),
}

/// Builds the fixed prompt for `topic`.
pub fn build_prompt(topic: &str) -> String {
    let mut prompt = format!(
        "Genera {QUESTION_COUNT} preguntas de opción múltiple sobre el tema: \"{}\".\n\
         Cada pregunta debe ser corta y entendible.\n\
         Cada pregunta debe tener un enunciado, cuatro opciones de respuesta (A, B, C, D) y la respuesta correcta.\n\
         \n\
         Sigue este FORMATO ESTRICTO y NO INCLUYAS NINGÚN TEXTO ADICIONAL, preámbulo o despedida:\n",
        topic.trim()
    );

    let blocks: Vec<String> = (1..=QUESTION_COUNT)
        .map(|n| {
            format!(
                "\n[Q{n}] PREGUNTA\n\
                 [A] OPCION_A\n\
                 [B] OPCION_B\n\
                 [C] OPCION_C\n\
                 [D] OPCION_D\n\
                 [ANSWER] RESPUESTA_CORRECTA (Solo la letra A, B, C o D)\n"
            )
        })
        .collect();
    prompt.push_str(&blocks.join(BLOCK_SEPARATOR));

    prompt
}

/// Forwards quiz prompts to the provider and relays the generated text.
#[derive(Clone)]
pub struct QuizGenerator {
    provider: Arc<dyn TextProvider>,
    strict_format: bool,
}

impl QuizGenerator {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self {
            provider,
            strict_format: false,
        }
    }

    /// Fail generation when the text does not parse as a quiz.
    pub fn with_strict_format(mut self, strict_format: bool) -> Self {
        self.strict_format = strict_format;
        self
    }

    /// Returns the provider's text verbatim. A malformed quiz is only logged
    /// unless strict format checking is enabled.
    pub async fn generate(&self, topic: &str) -> Result<String, QuizError> {
        let prompt = build_prompt(topic);
        let response = self.provider.generate(&prompt).await?;

        match quiz_format::parse_quiz(&response.text) {
            Ok(questions) => {
                tracing::debug!(topic = %topic, questions = questions.len(), "Quiz generated");
            }
            Err(e) if self.strict_format => return Err(e.into()),
            Err(e) => {
                tracing::warn!(topic = %topic, error = %e, "Generated quiz is malformed");
            }
        }

        Ok(response.text)
    }
}

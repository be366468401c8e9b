use serde::{Deserialize, Serialize};

pub const MISSING_TOPIC: &str = "El tema es requerido";

/// Body of `POST /api/generar-quiz`.
#[derive(Debug, Default, Deserialize)]
pub struct GenerateQuizRequest {
    #[serde(default, rename = "tema", alias = "topic")]
    pub topic: Option<String>,
}

impl GenerateQuizRequest {
    /// The trimmed topic, or `None` when missing or blank.
    pub fn topic(&self) -> Option<&str> {
        self.topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
    }
}

#[derive(Debug, Serialize)]
pub struct GeneratedQuizResponse {
    #[serde(rename = "generatedText")]
    pub generated_text: String,
}

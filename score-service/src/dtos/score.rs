use crate::models::NewScore;
use serde::{de::Error as _, Deserialize, Deserializer};

pub const MISSING_SCORE_FIELDS: &str = "Se requieren los campos \"nombreJugador\" y \"puntaje\".";

/// Body of `POST /api/puntajes`. Both the Spanish field names existing clients send and
/// the English aliases are accepted.
#[derive(Debug, Default, Deserialize)]
pub struct SaveScoreRequest {
    #[serde(default, rename = "nombreJugador", alias = "playerName")]
    pub player_name: Option<String>,

    #[serde(
        default,
        rename = "puntaje",
        alias = "score",
        deserialize_with = "deserialize_score"
    )]
    pub score: Option<f64>,
}

impl SaveScoreRequest {
    /// `None` when a required field is missing, null, or a blank name.
    pub fn into_new_score(self) -> Option<NewScore> {
        let player_name = self.player_name.filter(|name| !name.trim().is_empty())?;
        let score = self.score?;
        Some(NewScore::new(&player_name, score))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Accepts a JSON number or a numeric string.
fn deserialize_score<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<NumberOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrText::Number(value)) => Ok(Some(value)),
        Some(NumberOrText::Text(text)) => text
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("puntaje '{}' is not a number", text))),
    }
}

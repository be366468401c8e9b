//! Player score model persisted in the `puntajes` collection.

use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};
use validator::Validate;

/// A validated score submission, before the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewScore {
    #[validate(length(min = 1, message = "Player name must not be empty"))]
    pub player_name: String,

    pub score: f64,
}

impl NewScore {
    /// Player name is stored trimmed.
    pub fn new(player_name: &str, score: f64) -> Self {
        Self {
            player_name: player_name.trim().to_string(),
            score,
        }
    }

    /// Field validation plus the finiteness check BSON doubles need.
    pub fn check(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => validator::ValidationErrors::new(),
            Err(errors) => errors,
        };
        if !self.score.is_finite() {
            errors.add("score", validator::ValidationError::new("score_not_finite"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A stored score document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    #[serde(rename = "nombreJugador")]
    pub player_name: String,

    #[serde(rename = "puntaje")]
    pub score: f64,

    /// Creation time, truncated to the millisecond precision BSON keeps.
    #[serde(
        rename = "fecha",
        with = "mongodb::bson::serde_helpers::chrono_datetime_as_bson_datetime"
    )]
    pub timestamp: DateTime<Utc>,
}

impl ScoreRecord {
    /// Runs schema validation and assigns identity and timestamp.
    pub fn create(new_score: NewScore) -> Result<Self, validator::ValidationErrors> {
        new_score.check()?;
        Ok(Self {
            id: ObjectId::new(),
            player_name: new_score.player_name,
            score: new_score.score,
            timestamp: Utc::now().trunc_subsecs(3),
        })
    }

    pub fn to_response(&self) -> ScoreResponse {
        ScoreResponse {
            id: self.id.to_hex(),
            player_name: self.player_name.clone(),
            score: self.score,
            timestamp: self.timestamp,
        }
    }
}

/// JSON shape of a score returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreResponse {
    #[serde(rename = "_id")]
    pub id: String,

    #[serde(rename = "nombreJugador")]
    pub player_name: String,

    #[serde(rename = "puntaje", serialize_with = "serialize_number")]
    pub score: f64,

    #[serde(rename = "fecha")]
    pub timestamp: DateTime<Utc>,
}

/// Integral values are written as JSON integers so `42` round-trips as `42`.
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    const MAX_EXACT: f64 = 9_007_199_254_740_992.0;
    if value.fract() == 0.0 && value.abs() <= MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_score_trims_player_name() {
        let new_score = NewScore::new("  Ana  ", 42.0);
        assert_eq!(new_score.player_name, "Ana");
    }

    #[test]
    fn test_create_rejects_blank_name() {
        assert!(ScoreRecord::create(NewScore::new("   ", 10.0)).is_err());
    }

    #[test]
    fn test_create_rejects_non_finite_score() {
        assert!(ScoreRecord::create(NewScore::new("Ana", f64::NAN)).is_err());
        assert!(ScoreRecord::create(NewScore::new("Ana", f64::INFINITY)).is_err());
    }

    #[test]
    fn test_create_assigns_id_and_millisecond_timestamp() {
        let before = Utc::now().trunc_subsecs(3);
        let record = ScoreRecord::create(NewScore::new("Ana", 42.0)).unwrap();
        assert!(record.timestamp >= before);
        assert_eq!(record.timestamp.timestamp_subsec_nanos() % 1_000_000, 0);

        let other = ScoreRecord::create(NewScore::new("Ana", 42.0)).unwrap();
        assert_ne!(record.id, other.id);
    }

    #[test]
    fn test_response_uses_wire_names() {
        let record = ScoreRecord::create(NewScore::new("Ana", 42.0)).unwrap();
        let value = serde_json::to_value(record.to_response()).unwrap();

        assert_eq!(value["nombreJugador"], "Ana");
        assert_eq!(value["puntaje"], json!(42));
        assert_eq!(value["_id"], record.id.to_hex());
        assert!(value["fecha"].is_string());
    }

    #[test]
    fn test_fractional_score_stays_fractional() {
        let record = ScoreRecord::create(NewScore::new("Luis", 12.5)).unwrap();
        let value = serde_json::to_value(record.to_response()).unwrap();
        assert_eq!(value["puntaje"], json!(12.5));
    }

    #[test]
    fn test_record_bson_layout() {
        let record = ScoreRecord::create(NewScore::new("Ana", 7.0)).unwrap();
        let document = mongodb::bson::to_document(&record).unwrap();

        assert!(document.get_object_id("_id").is_ok());
        assert_eq!(document.get_str("nombreJugador").unwrap(), "Ana");
        assert_eq!(document.get_f64("puntaje").unwrap(), 7.0);
        assert!(document.get_datetime("fecha").is_ok());

        let decoded: ScoreRecord = mongodb::bson::from_document(document).unwrap();
        assert_eq!(decoded, record);
    }
}

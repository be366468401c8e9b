//! Domain models for the score service.

pub mod score;

pub use score::{NewScore, ScoreRecord, ScoreResponse};

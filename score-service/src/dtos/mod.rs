pub mod quiz;
pub mod score;

pub use quiz::{GenerateQuizRequest, GeneratedQuizResponse, MISSING_TOPIC};
pub use score::{SaveScoreRequest, MISSING_SCORE_FIELDS};

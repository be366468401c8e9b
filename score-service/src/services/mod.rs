pub mod database;
pub mod providers;
pub mod quiz;
pub mod quiz_format;

pub use database::{
    InMemoryScoreStore, MongoScoreStore, ScoreStore, StoreError, UnavailableScoreStore,
};
pub use quiz::{QuizError, QuizGenerator};

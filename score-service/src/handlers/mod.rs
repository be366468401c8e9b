pub mod health;
pub mod quiz;
pub mod scores;

pub use health::{health_check, not_found, root};
pub use quiz::generate_quiz;
pub use scores::{list_scores, save_score};

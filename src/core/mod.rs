// Core algorithm exports
pub mod quiz;
pub mod recommender;
pub mod rules;
pub mod scoring;
pub mod selector;

pub use quiz::{Advance, QuizError, QuizSession, QuizState, QUIZ_STEPS};
pub use recommender::{Recommendation, Recommender};
pub use rules::RuleBook;
pub use scoring::score_product;
pub use selector::{select, Thresholds};

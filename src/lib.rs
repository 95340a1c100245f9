//! Skin Matcher - product recommendation service behind the skin matcher quiz
//!
//! This library scores every catalog product against a completed skin quiz,
//! explains each score with human-readable reasons, and reduces the scored
//! set to a small, category-diverse, ranked shortlist.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{score_product, select, QuizSession, Recommender, RuleBook, Thresholds};
pub use crate::models::{
    ProductRecord, QuestionnaireAnswers, QuizAnswer, RecommendationResult, ScoredProduct,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let session = QuizSession::new();
        assert_eq!(session.step_index(), Some(0));
    }
}

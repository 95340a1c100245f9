// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeBracket, BudgetTier, Category, Concern, Gender, Lifestyle, ProductRecord,
    QuestionnaireAnswers, QuizAnswer, QuizStep, RecommendationResult, ScoredProduct, SkinType,
};
pub use requests::{FindRecommendationsRequest, RecordAnswerRequest, SessionRequest};
pub use responses::{
    ErrorResponse, FindRecommendationsResponse, HealthResponse, ProductCard,
    QuizProgressResponse, RecommendationResponse,
};

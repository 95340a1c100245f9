use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{QuestionnaireAnswers, QuizAnswer};

/// Request addressing an existing quiz session
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
}

/// Request to record an answer for the session's current step
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RecordAnswerRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "session_id", rename = "sessionId")]
    pub session_id: String,
    pub answer: QuizAnswer,
}

/// One-shot recommendation request with a fully completed questionnaire
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindRecommendationsRequest {
    pub answers: QuestionnaireAnswers,
    #[validate(range(min = 1, max = 10))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    3
}

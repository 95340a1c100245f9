use serde::{Deserialize, Serialize};

use crate::models::domain::{Category, QuestionnaireAnswers, QuizStep, ScoredProduct};

/// How many reasons a result card shows
const MAX_DISPLAYED_REASONS: usize = 3;

/// A shortlist entry with everything the UI needs to render a result
/// card and wire its add-to-cart action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCard {
    pub id: String,
    pub title: String,
    pub slug: String,
    pub price: f64,
    pub category: Category,
    #[serde(rename = "imageFileIds")]
    pub image_file_ids: Vec<String>,
    #[serde(rename = "inStock")]
    pub in_stock: bool,
    pub score: i32,
    pub reasons: Vec<String>,
}

impl From<&ScoredProduct> for ProductCard {
    fn from(scored: &ScoredProduct) -> Self {
        Self {
            id: scored.product.id.clone(),
            title: scored.product.title.clone(),
            slug: scored.product.slug.clone(),
            price: scored.product.price,
            category: scored.product.category,
            image_file_ids: scored.product.image_file_ids.clone(),
            in_stock: scored.product.in_stock,
            score: scored.score,
            reasons: scored
                .reasons
                .iter()
                .take(MAX_DISPLAYED_REASONS)
                .cloned()
                .collect(),
        }
    }
}

/// Current position of a quiz session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizProgressResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub state: String,
    pub step: Option<QuizStep>,
    #[serde(rename = "stepIndex")]
    pub step_index: Option<usize>,
    #[serde(rename = "totalSteps")]
    pub total_steps: usize,
}

/// Shortlist returned when a quiz session submits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub answers: QuestionnaireAnswers,
    pub recommendations: Vec<ProductCard>,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Shortlist returned by the stateless endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindRecommendationsResponse {
    pub recommendations: Vec<ProductCard>,
    #[serde(rename = "totalScored")]
    pub total_scored: usize,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
    #[serde(default)]
    pub retryable: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::ProductRecord;

    #[test]
    fn test_product_card_caps_reasons() {
        let scored = ScoredProduct {
            product: ProductRecord {
                id: "p1".to_string(),
                title: "Rose Soap".to_string(),
                category: Category::Soaps,
                ..Default::default()
            },
            score: 9,
            reasons: vec![
                "one".to_string(),
                "two".to_string(),
                "three".to_string(),
                "four".to_string(),
            ],
        };

        let card = ProductCard::from(&scored);
        assert_eq!(card.reasons.len(), 3);
        assert_eq!(card.reasons, vec!["one", "two", "three"]);
        assert_eq!(card.score, 9);
    }
}

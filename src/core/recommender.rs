use crate::core::rules::RuleBook;
use crate::core::scoring::score_product;
use crate::core::selector::{select, Thresholds};
use crate::models::{ProductRecord, QuestionnaireAnswers, ScoredProduct};

/// Result of a full recommendation run
#[derive(Debug)]
pub struct Recommendation {
    pub shortlist: Vec<ScoredProduct>,
    pub total_scored: usize,
}

/// Recommendation pipeline orchestrator
///
/// # Pipeline stages
/// 1. Score every catalog product against the answers
/// 2. Qualify by score threshold (with relaxation fallback)
/// 3. Diversify by category and rank
/// 4. Raw-catalog fallback when even the relaxed set is empty
#[derive(Debug, Clone)]
pub struct Recommender {
    rules: RuleBook,
    thresholds: Thresholds,
}

impl Recommender {
    pub fn new(rules: RuleBook, thresholds: Thresholds) -> Self {
        Self { rules, thresholds }
    }

    pub fn with_default_rules() -> Self {
        Self {
            rules: RuleBook::default(),
            thresholds: Thresholds::default(),
        }
    }

    /// Run the full pipeline over the fetched catalog
    ///
    /// Scoring is a plain sequential map; the catalog is small (tens to
    /// low hundreds of products). For a non-empty catalog the returned
    /// shortlist is never empty: when no product reaches even the
    /// relaxed threshold, the first `target_count` catalog products are
    /// returned as-is with their computed scores and reasons.
    pub fn recommend(
        &self,
        answers: &QuestionnaireAnswers,
        catalog: Vec<ProductRecord>,
        target_count: usize,
    ) -> Recommendation {
        let total_scored = catalog.len();

        let scored: Vec<ScoredProduct> = catalog
            .into_iter()
            .map(|product| {
                let (score, reasons) = score_product(&product, answers, &self.rules);
                ScoredProduct {
                    product,
                    score,
                    reasons,
                }
            })
            .collect();

        let mut shortlist = select(&scored, target_count, &self.thresholds);

        if shortlist.is_empty() {
            shortlist = scored.into_iter().take(target_count).collect();
        }

        Recommendation {
            shortlist,
            total_scored,
        }
    }
}

impl Default for Recommender {
    fn default() -> Self {
        Self::with_default_rules()
    }
}

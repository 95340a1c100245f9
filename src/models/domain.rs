use serde::{Deserialize, Serialize};
use std::fmt;

/// Age bracket collected by the quiz
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-55")]
    From46To55,
    #[serde(rename = "55+")]
    Over55,
}

/// Collected for profile completeness; no scoring rule reads it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Female,
    Male,
    NonBinary,
    Undisclosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Sensitive,
    Normal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concern {
    Acne,
    Aging,
    DarkSpots,
    Dryness,
    Sensitivity,
    Dullness,
    Pores,
    Texture,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Budget,
    MidRange,
    Premium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifestyle {
    Busy,
    Minimalist,
    Luxury,
    Natural,
}

/// Completed questionnaire, frozen once the final quiz step is answered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionnaireAnswers {
    #[serde(rename = "ageBracket")]
    pub age_bracket: AgeBracket,
    pub gender: Gender,
    #[serde(rename = "skinType")]
    pub skin_type: SkinType,
    pub concerns: Vec<Concern>,
    #[serde(rename = "budgetTier")]
    pub budget_tier: BudgetTier,
    pub lifestyle: Lifestyle,
}

/// Catalog categories carried by the storefront API
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Soaps,
    Teas,
    Lotions,
    Oils,
    BeardCare,
    Shampoos,
    RollOns,
    Elixirs,
    // Catch-all so an unrecognized category degrades instead of
    // failing deserialization of the whole record
    #[default]
    #[serde(other)]
    Other,
}

impl Category {
    /// Human-readable label used in recommendation reasons
    pub fn label(&self) -> &'static str {
        match self {
            Category::Soaps => "soaps",
            Category::Teas => "teas",
            Category::Lotions => "lotions",
            Category::Oils => "oils",
            Category::BeardCare => "beard care",
            Category::Shampoos => "shampoos",
            Category::RollOns => "roll-ons",
            Category::Elixirs => "elixirs",
            Category::Other => "catalog",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Product record as supplied by the storefront catalog API
///
/// Every field is defaulted so a partially-filled record deserializes
/// to empty/zero values; the scorer handles those defensively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "shortDescription", default)]
    pub short_description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "imageFileIds", default)]
    pub image_file_ids: Vec<String>,
    #[serde(rename = "inStock", default = "default_true")]
    pub in_stock: bool,
}

fn default_true() -> bool {
    true
}

/// A catalog product with its accumulated quiz score and the reasons
/// each rule contributed, in the order the rules fired
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product: ProductRecord,
    pub score: i32,
    pub reasons: Vec<String>,
}

/// Final output of a quiz run, cacheable for later redisplay
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub answers: QuestionnaireAnswers,
    pub recommendations: Vec<ScoredProduct>,
    #[serde(rename = "generatedAt")]
    pub generated_at: chrono::DateTime<chrono::Utc>,
}

/// The six fixed quiz steps, in presentation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QuizStep {
    Age,
    Gender,
    SkinType,
    Concerns,
    Budget,
    Lifestyle,
}

impl fmt::Display for QuizStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuizStep::Age => "age",
            QuizStep::Gender => "gender",
            QuizStep::SkinType => "skin type",
            QuizStep::Concerns => "concerns",
            QuizStep::Budget => "budget",
            QuizStep::Lifestyle => "lifestyle",
        };
        f.write_str(name)
    }
}

/// A single answer, tagged with the step it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "value", rename_all = "camelCase")]
pub enum QuizAnswer {
    Age(AgeBracket),
    Gender(Gender),
    SkinType(SkinType),
    Concerns(Vec<Concern>),
    Budget(BudgetTier),
    Lifestyle(Lifestyle),
}

impl QuizAnswer {
    pub fn step(&self) -> QuizStep {
        match self {
            QuizAnswer::Age(_) => QuizStep::Age,
            QuizAnswer::Gender(_) => QuizStep::Gender,
            QuizAnswer::SkinType(_) => QuizStep::SkinType,
            QuizAnswer::Concerns(_) => QuizStep::Concerns,
            QuizAnswer::Budget(_) => QuizStep::Budget,
            QuizAnswer::Lifestyle(_) => QuizStep::Lifestyle,
        }
    }
}

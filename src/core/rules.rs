use std::collections::HashMap;

use crate::models::{AgeBracket, BudgetTier, Category, Concern, Lifestyle, SkinType};

/// One rung of a tier ladder: a keyword set, the increment it is worth,
/// and the reason shown when it fires
#[derive(Debug, Clone)]
pub struct KeywordTier {
    pub keywords: Vec<String>,
    pub increment: i32,
    pub reason: String,
}

impl KeywordTier {
    fn new(keywords: &[&str], increment: i32, reason: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            increment,
            reason: reason.to_string(),
        }
    }

    /// Whether any keyword appears in the haystack
    pub fn matches(&self, haystack: &str) -> bool {
        self.keywords.iter().any(|k| haystack.contains(k.as_str()))
    }
}

/// Two-rung ladder: the strong tier preempts the weak one
#[derive(Debug, Clone)]
pub struct TierLadder {
    pub strong: KeywordTier,
    pub weak: KeywordTier,
}

impl TierLadder {
    /// First-match-wins over the two tiers
    pub fn first_match(&self, haystack: &str) -> Option<(i32, &str)> {
        if self.strong.matches(haystack) {
            Some((self.strong.increment, self.strong.reason.as_str()))
        } else if self.weak.matches(haystack) {
            Some((self.weak.increment, self.weak.reason.as_str()))
        } else {
            None
        }
    }
}

/// Skin-type rule: keyword ladder plus an optional category fallback
/// that contributes a small bonus when no keyword tier matched
#[derive(Debug, Clone)]
pub struct SkinTypeRule {
    pub ladder: TierLadder,
    pub category_fallback: Option<(Category, i32)>,
}

/// Fixed price bands compared against the user's budget tier
#[derive(Debug, Clone)]
pub struct BudgetBands {
    pub budget_max: f64,
    pub mid_range_max: f64,
    pub bonus: i32,
}

/// What makes a (category, answer) pair a domain-known good fit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AffinityTrigger {
    SkinType(SkinType),
    Concern(Concern),
}

/// Small fixed bonus for a category that is a known good fit for a
/// skin type or concern; stacks with the keyword rules, no reason
#[derive(Debug, Clone)]
pub struct CategoryAffinity {
    pub category: Category,
    pub trigger: AffinityTrigger,
    pub bonus: i32,
}

/// The full data-driven ruleset the scorer evaluates
///
/// Keeping the keyword tables here, out of the scoring code, lets each
/// ladder be inspected and tested on its own.
#[derive(Debug, Clone)]
pub struct RuleBook {
    pub age: HashMap<AgeBracket, TierLadder>,
    pub skin: HashMap<SkinType, SkinTypeRule>,
    pub concerns: HashMap<Concern, TierLadder>,
    pub budget: BudgetBands,
    pub lifestyle: HashMap<Lifestyle, KeywordTier>,
    pub affinities: Vec<CategoryAffinity>,
}

impl RuleBook {
    pub fn age_ladder(&self, bracket: AgeBracket) -> Option<&TierLadder> {
        self.age.get(&bracket)
    }

    pub fn skin_rule(&self, skin_type: SkinType) -> Option<&SkinTypeRule> {
        self.skin.get(&skin_type)
    }

    pub fn concern_ladder(&self, concern: Concern) -> Option<&TierLadder> {
        self.concerns.get(&concern)
    }

    pub fn lifestyle_tier(&self, lifestyle: Lifestyle) -> Option<&KeywordTier> {
        self.lifestyle.get(&lifestyle)
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        let mut age = HashMap::new();
        age.insert(
            AgeBracket::From18To25,
            TierLadder {
                strong: KeywordTier::new(
                    &["blemish", "breakout", "oil control", "clarifying"],
                    4,
                    "Targets the breakouts common in younger skin",
                ),
                weak: KeywordTier::new(
                    &["fresh", "gentle"],
                    2,
                    "A gentle everyday option for younger skin",
                ),
            },
        );
        age.insert(
            AgeBracket::From26To35,
            TierLadder {
                strong: KeywordTier::new(
                    &["early aging", "preventive", "antioxidant"],
                    4,
                    "Helps prevent the first signs of aging",
                ),
                weak: KeywordTier::new(
                    &["hydrating", "glow"],
                    2,
                    "Keeps skin hydrated and glowing",
                ),
            },
        );
        age.insert(
            AgeBracket::From36To45,
            TierLadder {
                strong: KeywordTier::new(
                    &["anti-aging", "firming", "collagen"],
                    5,
                    "Anti-aging care matched to your age group",
                ),
                weak: KeywordTier::new(
                    &["renewing", "smoothing"],
                    3,
                    "Renewing care for your age group",
                ),
            },
        );
        age.insert(
            AgeBracket::From46To55,
            TierLadder {
                strong: KeywordTier::new(
                    &["wrinkle", "lifting", "regenerating"],
                    5,
                    "Targets wrinkles and loss of firmness",
                ),
                weak: KeywordTier::new(
                    &["nourishing", "restoring"],
                    3,
                    "Restorative care for your age group",
                ),
            },
        );
        // Mature-skin language is rare in product copy, so a hit on the
        // oldest bracket is the strongest age signal of all
        age.insert(
            AgeBracket::Over55,
            TierLadder {
                strong: KeywordTier::new(
                    &["mature skin", "intensive repair", "deeply restoring"],
                    6,
                    "Intensive repair formulated for mature skin",
                ),
                weak: KeywordTier::new(
                    &["rich", "replenishing"],
                    3,
                    "Rich, replenishing care",
                ),
            },
        );

        let mut skin = HashMap::new();
        skin.insert(
            SkinType::Oily,
            SkinTypeRule {
                ladder: TierLadder {
                    strong: KeywordTier::new(
                        &["oil-free", "mattifying", "non-comedogenic", "lightweight"],
                        4,
                        "Keeps oily skin shine-free",
                    ),
                    weak: KeywordTier::new(
                        &["cleansing", "purifying"],
                        2,
                        "A thorough cleanse for oily skin",
                    ),
                },
                category_fallback: Some((Category::Soaps, 1)),
            },
        );
        skin.insert(
            SkinType::Dry,
            SkinTypeRule {
                ladder: TierLadder {
                    strong: KeywordTier::new(
                        &["hydrating", "moisturizing", "intensive"],
                        4,
                        "Deep hydration for dry skin",
                    ),
                    weak: KeywordTier::new(
                        &["nourishing", "rich"],
                        2,
                        "Nourishing care for dry skin",
                    ),
                },
                category_fallback: Some((Category::Oils, 1)),
            },
        );
        skin.insert(
            SkinType::Combination,
            SkinTypeRule {
                ladder: TierLadder {
                    strong: KeywordTier::new(
                        &["balancing", "dual action"],
                        4,
                        "Balances oily and dry zones",
                    ),
                    weak: KeywordTier::new(
                        &["gentle", "lightweight"],
                        2,
                        "Light enough for combination skin",
                    ),
                },
                category_fallback: Some((Category::Lotions, 1)),
            },
        );
        skin.insert(
            SkinType::Sensitive,
            SkinTypeRule {
                ladder: TierLadder {
                    strong: KeywordTier::new(
                        &["fragrance-free", "hypoallergenic", "soothing", "calming"],
                        4,
                        "Calming formula for sensitive skin",
                    ),
                    weak: KeywordTier::new(
                        &["gentle", "mild"],
                        2,
                        "Mild enough for sensitive skin",
                    ),
                },
                category_fallback: Some((Category::RollOns, 1)),
            },
        );
        skin.insert(
            SkinType::Normal,
            SkinTypeRule {
                ladder: TierLadder {
                    strong: KeywordTier::new(
                        &["balanced", "everyday", "daily care"],
                        3,
                        "Well suited to everyday care",
                    ),
                    weak: KeywordTier::new(
                        &["refreshing", "maintaining"],
                        1,
                        "Keeps normal skin feeling fresh",
                    ),
                },
                category_fallback: Some((Category::Lotions, 1)),
            },
        );

        let mut concerns = HashMap::new();
        concerns.insert(
            Concern::Acne,
            TierLadder {
                strong: KeywordTier::new(
                    &["salicylic", "anti-blemish", "acne"],
                    4,
                    "Made to fight acne and blemishes",
                ),
                weak: KeywordTier::new(
                    &["clarifying", "purifying"],
                    2,
                    "Clarifying care that helps prevent breakouts",
                ),
            },
        );
        concerns.insert(
            Concern::Aging,
            TierLadder {
                strong: KeywordTier::new(
                    &["anti-aging", "wrinkle", "firming"],
                    4,
                    "Targets visible signs of aging",
                ),
                weak: KeywordTier::new(&["collagen", "renewing"], 2, "Supports skin renewal"),
            },
        );
        concerns.insert(
            Concern::DarkSpots,
            TierLadder {
                strong: KeywordTier::new(
                    &["dark spot", "brightening", "even tone"],
                    4,
                    "Helps fade dark spots and even skin tone",
                ),
                weak: KeywordTier::new(
                    &["vitamin c", "radiance"],
                    2,
                    "Brightens for a more even look",
                ),
            },
        );
        concerns.insert(
            Concern::Dryness,
            TierLadder {
                strong: KeywordTier::new(
                    &["hydrating", "moisture", "intensive"],
                    4,
                    "Delivers the deep moisture dry skin needs",
                ),
                weak: KeywordTier::new(
                    &["nourishing", "softening"],
                    2,
                    "Softens and nourishes dry patches",
                ),
            },
        );
        concerns.insert(
            Concern::Sensitivity,
            TierLadder {
                strong: KeywordTier::new(
                    &["soothing", "calming", "hypoallergenic"],
                    4,
                    "Soothes easily irritated skin",
                ),
                weak: KeywordTier::new(&["gentle", "mild"], 2, "Gentle on reactive skin"),
            },
        );
        concerns.insert(
            Concern::Dullness,
            TierLadder {
                strong: KeywordTier::new(
                    &["brightening", "glow", "radiance"],
                    4,
                    "Restores glow to dull skin",
                ),
                weak: KeywordTier::new(
                    &["exfoliating", "revitalizing"],
                    2,
                    "Revitalizes tired-looking skin",
                ),
            },
        );
        concerns.insert(
            Concern::Pores,
            TierLadder {
                strong: KeywordTier::new(
                    &["pore", "non-comedogenic"],
                    4,
                    "Helps minimize the look of pores",
                ),
                weak: KeywordTier::new(
                    &["mattifying", "toning"],
                    2,
                    "Tones and refines skin texture",
                ),
            },
        );
        concerns.insert(
            Concern::Texture,
            TierLadder {
                strong: KeywordTier::new(
                    &["exfoliating", "smoothing", "resurfacing"],
                    4,
                    "Smooths uneven skin texture",
                ),
                weak: KeywordTier::new(&["refining", "renewing"], 2, "Refines skin over time"),
            },
        );

        let mut lifestyle = HashMap::new();
        lifestyle.insert(
            Lifestyle::Natural,
            KeywordTier::new(&["natural", "organic"], 2, "Made with natural ingredients"),
        );
        lifestyle.insert(
            Lifestyle::Minimalist,
            KeywordTier::new(
                &["multi-purpose", "essential"],
                2,
                "A multi-purpose staple for a minimalist routine",
            ),
        );
        lifestyle.insert(
            Lifestyle::Luxury,
            KeywordTier::new(&["premium", "luxury"], 2, "An indulgent, luxurious pick"),
        );
        // Lifestyle::Busy intentionally has no keyword entry; the shipped
        // ruleset defines no copy signal for it

        let affinities = vec![
            CategoryAffinity {
                category: Category::Oils,
                trigger: AffinityTrigger::SkinType(SkinType::Dry),
                bonus: 2,
            },
            CategoryAffinity {
                category: Category::Soaps,
                trigger: AffinityTrigger::SkinType(SkinType::Oily),
                bonus: 2,
            },
            CategoryAffinity {
                category: Category::Lotions,
                trigger: AffinityTrigger::Concern(Concern::Dryness),
                bonus: 2,
            },
            CategoryAffinity {
                category: Category::Elixirs,
                trigger: AffinityTrigger::Concern(Concern::Aging),
                bonus: 2,
            },
            CategoryAffinity {
                category: Category::Soaps,
                trigger: AffinityTrigger::Concern(Concern::Acne),
                bonus: 1,
            },
        ];

        Self {
            age,
            skin,
            concerns,
            budget: BudgetBands {
                budget_max: 25.0,
                mid_range_max: 50.0,
                bonus: 2,
            },
            lifestyle,
            affinities,
        }
    }
}

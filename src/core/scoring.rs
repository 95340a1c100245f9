use crate::core::rules::{AffinityTrigger, RuleBook};
use crate::models::{ProductRecord, QuestionnaireAnswers};

/// Score a single product against the completed questionnaire
///
/// Pure and deterministic: the same `(product, answers)` pair always
/// yields the same `(score, reasons)`. Rules evaluate in a fixed order
/// (age, skin type, concerns, budget, lifestyle, category affinity) and
/// each contributes an independent increment plus at most one reason.
/// Malformed records never fail: missing text behaves as empty, missing
/// price as zero, and a record without an id or title scores 0 with no
/// reasons so the qualifier drops it.
pub fn score_product(
    product: &ProductRecord,
    answers: &QuestionnaireAnswers,
    rules: &RuleBook,
) -> (i32, Vec<String>) {
    if product.id.trim().is_empty() || product.title.trim().is_empty() {
        return (0, Vec::new());
    }

    let haystack = build_haystack(product);

    let mut score = 0;
    let mut reasons = Vec::new();

    let (increment, reason) = age_rule(&haystack, answers, rules);
    score += increment;
    reasons.extend(reason);

    let (increment, reason) = skin_type_rule(&haystack, product, answers, rules);
    score += increment;
    reasons.extend(reason);

    // Each selected concern applies its own ladder independently
    for concern in &answers.concerns {
        if let Some(ladder) = rules.concern_ladder(*concern) {
            if let Some((increment, reason)) = ladder.first_match(&haystack) {
                score += increment;
                reasons.push(reason.to_string());
            }
        }
    }

    let (increment, reason) = budget_rule(product.price, answers, rules);
    score += increment;
    reasons.extend(reason);

    let (increment, reason) = lifestyle_rule(&haystack, product, answers, rules);
    score += increment;
    reasons.extend(reason);

    // Affinity bonuses stack on top of the keyword rules without a reason
    score += category_affinity_bonus(product, answers, rules);

    // A product carried by affinity alone still gets a displayable reason
    if reasons.is_empty() {
        reasons.push(format!(
            "A customer favorite from our {} collection",
            product.category.label()
        ));
    }

    (score, reasons)
}

/// Lower-cased concatenation of the product's long and short copy,
/// the substring-search target for every keyword rule
fn build_haystack(product: &ProductRecord) -> String {
    format!("{} {}", product.description, product.short_description).to_lowercase()
}

fn age_rule(
    haystack: &str,
    answers: &QuestionnaireAnswers,
    rules: &RuleBook,
) -> (i32, Option<String>) {
    match rules
        .age_ladder(answers.age_bracket)
        .and_then(|ladder| ladder.first_match(haystack))
    {
        Some((increment, reason)) => (increment, Some(reason.to_string())),
        None => (0, None),
    }
}

fn skin_type_rule(
    haystack: &str,
    product: &ProductRecord,
    answers: &QuestionnaireAnswers,
    rules: &RuleBook,
) -> (i32, Option<String>) {
    let Some(rule) = rules.skin_rule(answers.skin_type) else {
        return (0, None);
    };

    if let Some((increment, reason)) = rule.ladder.first_match(haystack) {
        return (increment, Some(reason.to_string()));
    }

    // Category fallback kicks in only when no keyword tier matched
    if let Some((category, bonus)) = rule.category_fallback {
        if product.category == category {
            return (
                bonus,
                Some(format!(
                    "Our {} suit {} skin",
                    category.label(),
                    skin_type_label(answers)
                )),
            );
        }
    }

    (0, None)
}

fn skin_type_label(answers: &QuestionnaireAnswers) -> &'static str {
    use crate::models::SkinType;
    match answers.skin_type {
        SkinType::Oily => "oily",
        SkinType::Dry => "dry",
        SkinType::Combination => "combination",
        SkinType::Sensitive => "sensitive",
        SkinType::Normal => "normal",
    }
}

fn budget_rule(
    price: f64,
    answers: &QuestionnaireAnswers,
    rules: &RuleBook,
) -> (i32, Option<String>) {
    use crate::models::BudgetTier;

    let bands = &rules.budget;
    let (in_band, reason) = match answers.budget_tier {
        BudgetTier::Budget => (
            price <= bands.budget_max,
            "Fits your budget-friendly price range",
        ),
        BudgetTier::MidRange => (
            price > bands.budget_max && price <= bands.mid_range_max,
            "Priced within your mid-range budget",
        ),
        BudgetTier::Premium => (
            price > bands.mid_range_max,
            "A premium product to match your budget",
        ),
    };

    if in_band {
        (bands.bonus, Some(reason.to_string()))
    } else {
        // Out of band is neutral: no increment, no penalty
        (0, None)
    }
}

fn lifestyle_rule(
    haystack: &str,
    product: &ProductRecord,
    answers: &QuestionnaireAnswers,
    rules: &RuleBook,
) -> (i32, Option<String>) {
    let Some(tier) = rules.lifestyle_tier(answers.lifestyle) else {
        return (0, None);
    };

    let tag_match = product.tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        tier.keywords.iter().any(|k| tag.contains(k.as_str()))
    });

    if tag_match || tier.matches(haystack) {
        (tier.increment, Some(tier.reason.clone()))
    } else {
        (0, None)
    }
}

fn category_affinity_bonus(
    product: &ProductRecord,
    answers: &QuestionnaireAnswers,
    rules: &RuleBook,
) -> i32 {
    rules
        .affinities
        .iter()
        .filter(|affinity| affinity.category == product.category)
        .filter(|affinity| match affinity.trigger {
            AffinityTrigger::SkinType(skin_type) => skin_type == answers.skin_type,
            AffinityTrigger::Concern(concern) => answers.concerns.contains(&concern),
        })
        .map(|affinity| affinity.bonus)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AgeBracket, BudgetTier, Category, Concern, Gender, Lifestyle, SkinType,
    };

    fn product(description: &str, category: Category, price: f64, tags: &[&str]) -> ProductRecord {
        ProductRecord {
            id: "prod_1".to_string(),
            title: "Test Product".to_string(),
            description: description.to_string(),
            short_description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            category,
            price,
            slug: "test-product".to_string(),
            image_file_ids: vec![],
            in_stock: true,
        }
    }

    fn answers() -> QuestionnaireAnswers {
        QuestionnaireAnswers {
            age_bracket: AgeBracket::From36To45,
            gender: Gender::Female,
            skin_type: SkinType::Dry,
            concerns: vec![Concern::Dryness],
            budget_tier: BudgetTier::MidRange,
            lifestyle: Lifestyle::Natural,
        }
    }

    #[test]
    fn test_high_scoring_product() {
        // Strong tiers across age, skin type and concern, plus budget,
        // lifestyle and category affinity
        let rules = RuleBook::default();
        let product = product(
            "intensive hydrating anti-aging formula",
            Category::Oils,
            30.0,
            &["natural"],
        );

        let (score, reasons) = score_product(&product, &answers(), &rules);

        // age strong (5) + skin strong (4) + dryness strong (4)
        // + budget (2) + lifestyle (2) + oils-for-dry affinity (2)
        assert_eq!(score, 19);
        assert!(reasons.len() >= 4);

        let distinct: std::collections::HashSet<_> = reasons.iter().collect();
        assert!(distinct.len() >= 4);
    }

    #[test]
    fn test_blank_product_scores_zero() {
        let rules = RuleBook::default();
        let product = product("", Category::Teas, 200.0, &[]);

        let (score, reasons) = score_product(&product, &answers(), &rules);

        assert_eq!(score, 0);
        // No rule fired, so only the generic category fallback remains
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("teas"));
    }

    #[test]
    fn test_missing_id_yields_no_reasons() {
        let rules = RuleBook::default();
        let mut product = product("intensive hydrating formula", Category::Oils, 30.0, &[]);
        product.id = String::new();

        let (score, reasons) = score_product(&product, &answers(), &rules);
        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_missing_title_yields_no_reasons() {
        let rules = RuleBook::default();
        let mut product = product("intensive hydrating formula", Category::Oils, 30.0, &[]);
        product.title = "  ".to_string();

        let (score, reasons) = score_product(&product, &answers(), &rules);
        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let rules = RuleBook::default();
        let product = product(
            "gentle nourishing natural soap",
            Category::Soaps,
            12.0,
            &["organic"],
        );
        let answers = answers();

        let first = score_product(&product, &answers, &rules);
        for _ in 0..10 {
            assert_eq!(score_product(&product, &answers, &rules), first);
        }
    }

    #[test]
    fn test_keyword_density_monotonicity() {
        let rules = RuleBook::default();
        let answers = answers();

        let without = product("a plain bar", Category::Shampoos, 30.0, &[]);
        let with_weak = product("a nourishing bar", Category::Shampoos, 30.0, &[]);
        let with_strong = product(
            "a nourishing, deeply hydrating bar",
            Category::Shampoos,
            30.0,
            &[],
        );

        let (base, _) = score_product(&without, &answers, &rules);
        let (weak, _) = score_product(&with_weak, &answers, &rules);
        let (strong, _) = score_product(&with_strong, &answers, &rules);

        assert!(weak >= base);
        assert!(strong >= weak);
    }

    #[test]
    fn test_strong_tier_skips_weak_for_same_rule() {
        let rules = RuleBook::default();
        // Matches both dry-skin tiers; only the strong one may fire
        let product = product("rich hydrating cream", Category::Lotions, 30.0, &[]);

        let (_, reasons) = score_product(&product, &answers(), &rules);
        assert!(reasons.contains(&"Deep hydration for dry skin".to_string()));
        assert!(!reasons.contains(&"Nourishing care for dry skin".to_string()));
    }

    #[test]
    fn test_skin_category_fallback_without_keywords() {
        let rules = RuleBook::default();
        let mut answers = answers();
        answers.skin_type = SkinType::Oily;
        answers.concerns = vec![Concern::Texture];
        answers.budget_tier = BudgetTier::Premium;
        answers.lifestyle = Lifestyle::Busy;

        // No keyword hits at all, but the product is a soap
        let product = product("a plain bar", Category::Soaps, 10.0, &[]);
        let (score, reasons) = score_product(&product, &answers, &rules);

        // fallback (1) + soaps-for-oily affinity (2)
        assert_eq!(score, 3);
        assert!(reasons.iter().any(|r| r.contains("soaps")));
    }

    #[test]
    fn test_budget_band_edges() {
        let rules = RuleBook::default();
        let mut answers = answers();

        answers.budget_tier = BudgetTier::Budget;
        let at_25 = product("plain", Category::Teas, 25.0, &[]);
        let (score, _) = score_product(&at_25, &answers, &rules);
        assert_eq!(score, 2);

        answers.budget_tier = BudgetTier::MidRange;
        let (score, _) = score_product(&at_25, &answers, &rules);
        assert_eq!(score, 0);

        let at_50 = product("plain", Category::Teas, 50.0, &[]);
        let (score, _) = score_product(&at_50, &answers, &rules);
        assert_eq!(score, 2);

        answers.budget_tier = BudgetTier::Premium;
        let (score, _) = score_product(&at_50, &answers, &rules);
        assert_eq!(score, 0);

        let above = product("plain", Category::Teas, 50.01, &[]);
        let (score, _) = score_product(&above, &answers, &rules);
        assert_eq!(score, 2);
    }

    #[test]
    fn test_multiple_concerns_accumulate() {
        let rules = RuleBook::default();
        let mut answers = answers();
        answers.concerns = vec![Concern::Dullness, Concern::Texture];
        answers.skin_type = SkinType::Normal;
        answers.age_bracket = AgeBracket::From18To25;
        answers.budget_tier = BudgetTier::Premium;
        answers.lifestyle = Lifestyle::Busy;

        let product = product(
            "brightening and exfoliating scrub",
            Category::Teas,
            10.0,
            &[],
        );
        let (score, reasons) = score_product(&product, &answers, &rules);

        // dullness strong (4) + texture strong (4)
        assert_eq!(score, 8);
        assert_eq!(reasons.len(), 2);
    }

    #[test]
    fn test_busy_lifestyle_never_matches() {
        let rules = RuleBook::default();
        let mut answers = answers();
        answers.lifestyle = Lifestyle::Busy;

        let natural = product("plain", Category::Teas, 100.0, &["natural", "essential"]);
        let mut answers_no_signal = answers.clone();
        answers_no_signal.concerns = vec![Concern::Pores];
        answers_no_signal.skin_type = SkinType::Normal;
        answers_no_signal.age_bracket = AgeBracket::From18To25;
        answers_no_signal.budget_tier = BudgetTier::Budget;

        let (score, _) = score_product(&natural, &answers_no_signal, &rules);
        assert_eq!(score, 0);
    }

    #[test]
    fn test_lifestyle_matches_tags() {
        let rules = RuleBook::default();
        let mut answers = answers();
        answers.lifestyle = Lifestyle::Luxury;
        answers.concerns = vec![Concern::Pores];
        answers.skin_type = SkinType::Normal;
        answers.age_bracket = AgeBracket::From18To25;
        answers.budget_tier = BudgetTier::Budget;

        let tagged = product("plain", Category::Elixirs, 100.0, &["Premium"]);
        let (score, reasons) = score_product(&tagged, &answers, &rules);

        assert_eq!(score, 2);
        assert!(reasons.contains(&"An indulgent, luxurious pick".to_string()));
    }
}

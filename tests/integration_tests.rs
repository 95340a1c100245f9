// Integration tests for the skin matcher engine

use skin_matcher::core::{Advance, QuizSession, Recommender};
use skin_matcher::models::{
    AgeBracket, BudgetTier, Category, Concern, Gender, Lifestyle, ProductRecord,
    QuestionnaireAnswers, QuizAnswer, SkinType,
};

fn catalog_product(
    id: &str,
    description: &str,
    category: Category,
    price: f64,
    tags: &[&str],
) -> ProductRecord {
    ProductRecord {
        id: id.to_string(),
        title: format!("Product {}", id),
        description: description.to_string(),
        short_description: String::new(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category,
        price,
        slug: format!("product-{}", id),
        image_file_ids: vec![],
        in_stock: true,
    }
}

fn sample_catalog() -> Vec<ProductRecord> {
    vec![
        catalog_product(
            "oil-1",
            "intensive hydrating anti-aging facial oil",
            Category::Oils,
            30.0,
            &["natural"],
        ),
        catalog_product(
            "oil-2",
            "lightweight cleansing oil",
            Category::Oils,
            18.0,
            &[],
        ),
        catalog_product(
            "lotion-1",
            "nourishing hand lotion for dry patches",
            Category::Lotions,
            28.0,
            &["organic"],
        ),
        catalog_product(
            "soap-1",
            "purifying charcoal soap with oil control",
            Category::Soaps,
            12.0,
            &[],
        ),
        catalog_product("tea-1", "plain black tea", Category::Teas, 9.0, &[]),
        catalog_product(
            "elixir-1",
            "firming wrinkle elixir with collagen",
            Category::Elixirs,
            85.0,
            &["premium"],
        ),
    ]
}

fn dry_skin_answers() -> QuestionnaireAnswers {
    QuestionnaireAnswers {
        age_bracket: AgeBracket::From36To45,
        gender: Gender::Female,
        skin_type: SkinType::Dry,
        concerns: vec![Concern::Dryness, Concern::Aging],
        budget_tier: BudgetTier::MidRange,
        lifestyle: Lifestyle::Natural,
    }
}

#[test]
fn test_end_to_end_recommendation() {
    let recommender = Recommender::with_default_rules();

    let result = recommender.recommend(&dry_skin_answers(), sample_catalog(), 3);

    assert_eq!(result.total_scored, 6);
    assert!(!result.shortlist.is_empty());
    assert!(result.shortlist.len() <= 3);

    // Score-descending with no category repeated
    let mut seen = std::collections::HashSet::new();
    for pair in result.shortlist.windows(2) {
        assert!(pair[0].score >= pair[1].score, "shortlist not sorted");
    }
    for entry in &result.shortlist {
        assert!(seen.insert(entry.product.category), "duplicate category");
        assert!(!entry.reasons.is_empty(), "entry has no reasons");
    }

    // The hydrating anti-aging oil is the obvious winner here
    assert_eq!(result.shortlist[0].product.id, "oil-1");
}

#[test]
fn test_oily_skin_surfaces_different_products() {
    let recommender = Recommender::with_default_rules();
    let answers = QuestionnaireAnswers {
        age_bracket: AgeBracket::From18To25,
        gender: Gender::Male,
        skin_type: SkinType::Oily,
        concerns: vec![Concern::Acne],
        budget_tier: BudgetTier::Budget,
        lifestyle: Lifestyle::Minimalist,
    };

    let result = recommender.recommend(&answers, sample_catalog(), 3);

    assert!(!result.shortlist.is_empty());
    // The charcoal soap outranks the moisturizing products
    assert_eq!(result.shortlist[0].product.id, "soap-1");
}

#[test]
fn test_quiz_walkthrough_produces_frozen_answers() {
    let mut session = QuizSession::new();

    session
        .record_answer(QuizAnswer::Age(AgeBracket::From36To45))
        .unwrap();
    session.next().unwrap();
    session
        .record_answer(QuizAnswer::Gender(Gender::Female))
        .unwrap();
    session.next().unwrap();
    session
        .record_answer(QuizAnswer::SkinType(SkinType::Dry))
        .unwrap();
    session.next().unwrap();
    session
        .record_answer(QuizAnswer::Concerns(vec![Concern::Dryness, Concern::Aging]))
        .unwrap();
    session.next().unwrap();
    session
        .record_answer(QuizAnswer::Budget(BudgetTier::MidRange))
        .unwrap();
    session.next().unwrap();
    session
        .record_answer(QuizAnswer::Lifestyle(Lifestyle::Natural))
        .unwrap();

    let Advance::ReadyToSubmit(answers) = session.next().unwrap() else {
        panic!("expected submission");
    };

    assert_eq!(answers, dry_skin_answers());

    // Run the pipeline the way the HTTP layer would
    let recommender = Recommender::with_default_rules();
    let recommendation = recommender.recommend(&answers, sample_catalog(), 3);

    let result = skin_matcher::models::RecommendationResult {
        answers,
        recommendations: recommendation.shortlist,
        generated_at: chrono::Utc::now(),
    };
    session.complete(result).unwrap();

    let stored = session.result().expect("results stored");
    assert_eq!(stored.recommendations[0].product.id, "oil-1");
}

#[test]
fn test_result_serializes_for_the_cache() {
    let recommender = Recommender::with_default_rules();
    let recommendation = recommender.recommend(&dry_skin_answers(), sample_catalog(), 3);

    let result = skin_matcher::models::RecommendationResult {
        answers: dry_skin_answers(),
        recommendations: recommendation.shortlist,
        generated_at: chrono::Utc::now(),
    };

    let json = serde_json::to_string(&result).unwrap();
    let restored: skin_matcher::models::RecommendationResult =
        serde_json::from_str(&json).unwrap();

    assert_eq!(restored.recommendations.len(), result.recommendations.len());
    assert_eq!(restored.answers, result.answers);
}

#[test]
fn test_sparse_catalog_records_are_tolerated() {
    let recommender = Recommender::with_default_rules();

    let mut catalog = sample_catalog();
    // Record with no id: scored 0, silently dropped by the qualifier
    catalog.push(ProductRecord {
        title: "Ghost Product".to_string(),
        ..Default::default()
    });
    // Record with no text at all
    catalog.push(ProductRecord {
        id: "bare".to_string(),
        title: "Bare Product".to_string(),
        ..Default::default()
    });

    let result = recommender.recommend(&dry_skin_answers(), catalog, 3);

    assert!(result
        .shortlist
        .iter()
        .all(|p| p.product.id != "" && p.product.id != "bare"));
}

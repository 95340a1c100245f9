use std::collections::HashSet;

use crate::models::ScoredProduct;

/// Score thresholds used when qualifying scored products
#[derive(Debug, Clone, Copy)]
pub struct Thresholds {
    pub qualified_min: i32,
    pub relaxed_min: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            qualified_min: 3,
            relaxed_min: 1,
        }
    }
}

/// Reduce the full scored set to a ranked, category-diverse shortlist
///
/// Products scoring at least `qualified_min` qualify; when fewer than
/// `target_count` do, the whole scored list is re-filtered at
/// `relaxed_min` instead. Candidates are then sorted by score
/// (descending, stable so ties keep catalog order), reduced to the best
/// product per category, and truncated to `target_count`.
///
/// The result has at most `target_count` entries, no two entries share a
/// category, and scores never increase along the list. An empty result
/// is possible; the caller substitutes raw catalog products in that case.
pub fn select(
    scored: &[ScoredProduct],
    target_count: usize,
    thresholds: &Thresholds,
) -> Vec<ScoredProduct> {
    let mut candidates: Vec<&ScoredProduct> = scored
        .iter()
        .filter(|p| p.score >= thresholds.qualified_min)
        .collect();

    // Full re-filter of the original scored list, not of the qualified set
    if candidates.len() < target_count {
        candidates = scored
            .iter()
            .filter(|p| p.score >= thresholds.relaxed_min)
            .collect();
    }

    candidates.sort_by(|a, b| b.score.cmp(&a.score));

    // Best per category: the list is score-descending, so the first
    // product seen for a category is that category's best and the
    // surviving list stays sorted
    let mut seen_categories = HashSet::new();
    let mut shortlist: Vec<ScoredProduct> = candidates
        .into_iter()
        .filter(|p| seen_categories.insert(p.product.category))
        .cloned()
        .collect();

    shortlist.truncate(target_count);
    shortlist
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, ProductRecord};

    fn scored(id: &str, category: Category, score: i32) -> ScoredProduct {
        ScoredProduct {
            product: ProductRecord {
                id: id.to_string(),
                title: format!("Product {}", id),
                category,
                ..Default::default()
            },
            score,
            reasons: vec![],
        }
    }

    #[test]
    fn test_shortlist_bounded_by_target() {
        let products = vec![
            scored("1", Category::Soaps, 8),
            scored("2", Category::Oils, 7),
            scored("3", Category::Teas, 6),
            scored("4", Category::Lotions, 5),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());
        assert_eq!(shortlist.len(), 3);
    }

    #[test]
    fn test_shortlist_bounded_by_input() {
        let products = vec![
            scored("1", Category::Soaps, 8),
            scored("2", Category::Oils, 7),
        ];

        // Two products, target three: no padding with duplicates
        let shortlist = select(&products, 3, &Thresholds::default());
        assert_eq!(shortlist.len(), 2);
    }

    #[test]
    fn test_category_diversity() {
        let products = vec![
            scored("1", Category::Soaps, 9),
            scored("2", Category::Soaps, 8),
            scored("3", Category::Oils, 7),
            scored("4", Category::Oils, 6),
            scored("5", Category::Teas, 5),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());

        assert_eq!(shortlist.len(), 3);
        let categories: HashSet<_> = shortlist.iter().map(|p| p.product.category).collect();
        assert_eq!(categories.len(), 3);

        // The category winner is the higher-scoring product
        assert_eq!(shortlist[0].product.id, "1");
        assert_eq!(shortlist[1].product.id, "3");
        assert_eq!(shortlist[2].product.id, "5");
    }

    #[test]
    fn test_score_descending() {
        let products = vec![
            scored("1", Category::Soaps, 3),
            scored("2", Category::Oils, 9),
            scored("3", Category::Teas, 6),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());

        for pair in shortlist.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(shortlist[0].product.id, "2");
    }

    #[test]
    fn test_relaxation_refilters_original_list() {
        // Everything below the qualified threshold, but three products
        // reach the relaxed one
        let products = vec![
            scored("1", Category::Soaps, 2),
            scored("2", Category::Oils, 1),
            scored("3", Category::Teas, 2),
            scored("4", Category::Lotions, 0),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());

        assert_eq!(shortlist.len(), 3);
        assert!(shortlist.iter().all(|p| p.score >= 1));
        assert!(!shortlist.iter().any(|p| p.product.id == "4"));
    }

    #[test]
    fn test_relaxation_skipped_when_enough_qualify() {
        let products = vec![
            scored("1", Category::Soaps, 5),
            scored("2", Category::Oils, 4),
            scored("3", Category::Teas, 3),
            scored("4", Category::Lotions, 1),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());

        // The relaxed-only product never appears
        assert_eq!(shortlist.len(), 3);
        assert!(shortlist.iter().all(|p| p.score >= 3));
    }

    #[test]
    fn test_empty_when_nothing_reaches_relaxed_threshold() {
        let products = vec![
            scored("1", Category::Soaps, 0),
            scored("2", Category::Oils, 0),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());
        assert!(shortlist.is_empty());
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let products = vec![
            scored("first", Category::Soaps, 5),
            scored("second", Category::Oils, 5),
            scored("third", Category::Teas, 5),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());

        assert_eq!(shortlist[0].product.id, "first");
        assert_eq!(shortlist[1].product.id, "second");
        assert_eq!(shortlist[2].product.id, "third");
    }

    #[test]
    fn test_tied_category_keeps_first_seen() {
        let products = vec![
            scored("a", Category::Soaps, 5),
            scored("b", Category::Soaps, 5),
            scored("c", Category::Oils, 4),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());

        assert_eq!(shortlist.len(), 2);
        assert_eq!(shortlist[0].product.id, "a");
    }

    #[test]
    fn test_fewer_categories_than_target() {
        let products = vec![
            scored("1", Category::Soaps, 9),
            scored("2", Category::Soaps, 8),
            scored("3", Category::Soaps, 7),
        ];

        let shortlist = select(&products, 3, &Thresholds::default());

        // One category only: one survivor
        assert_eq!(shortlist.len(), 1);
        assert_eq!(shortlist[0].product.id, "1");
    }
}

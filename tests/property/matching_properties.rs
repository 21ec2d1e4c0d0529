use price_match_rust::models::{ObservedItem, ReferenceItem};
use price_match_rust::service::{aggregate, normalize, score};
use price_match_rust::Matcher;
use proptest::prelude::*;

fn token_vec() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z0-9]{1,6}", 0..8)
}

proptest! {
    #[test]
    fn normalization_is_deterministic(s in ".{0,80}") {
        prop_assert_eq!(normalize(&s), normalize(&s));
    }

    #[test]
    fn normalized_tokens_are_clean(s in ".{0,80}") {
        for token in normalize(&s) {
            prop_assert!(!token.is_empty());
            prop_assert!(token.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn case_does_not_matter(s in "[a-zA-Z0-9 ]{0,40}") {
        prop_assert_eq!(normalize(&s.to_uppercase()), normalize(&s.to_lowercase()));
    }

    #[test]
    fn similarity_is_symmetric(a in token_vec(), b in token_vec()) {
        prop_assert_eq!(score(&a, &b), score(&b, &a));
    }

    #[test]
    fn similarity_is_bounded(a in token_vec(), b in token_vec()) {
        let s = score(&a, &b);
        prop_assert!((0.0..=100.0).contains(&s));
    }

    #[test]
    fn empty_side_scores_zero(a in token_vec()) {
        prop_assert_eq!(score(&[], &a), 0.0);
        prop_assert_eq!(score(&a, &[]), 0.0);
    }

    #[test]
    fn self_similarity_is_hundred(a in prop::collection::vec("[a-z0-9]{1,6}", 1..8)) {
        prop_assert_eq!(score(&a, &a), 100.0);
    }

    #[test]
    fn parallel_matches_sequential(
        refs in prop::collection::vec("[a-d ]{0,12}", 0..6),
        obs in prop::collection::vec("[a-d ]{0,12}", 0..6),
    ) {
        let references: Vec<ReferenceItem> = refs
            .iter()
            .enumerate()
            .map(|(i, d)| ReferenceItem::new(format!("R{i}"), d.as_str(), 1.0))
            .collect();
        let observed: Vec<ObservedItem> = obs
            .iter()
            .enumerate()
            .map(|(i, d)| ObservedItem::new(format!("O{i}"), d.as_str(), 1.0))
            .collect();

        let matcher = Matcher::new();
        let sequential = matcher.run(&references, &observed);
        prop_assert_eq!(&sequential, &matcher.run_parallel(&references, &observed));
        prop_assert!(sequential.len() <= references.len() * observed.len());
        prop_assert!(sequential.iter().all(|e| e.score > 10.0));
    }

    #[test]
    fn stats_count_matches_input(reference in 1.0f64..1000.0, prices in prop::collection::vec(0.01f64..1000.0, 0..20)) {
        let stats = aggregate(reference, &prices);
        prop_assert_eq!(stats.count, prices.len());
        prop_assert!(stats.min <= stats.avg + 1e-9);
        prop_assert!(stats.avg <= stats.max + 1e-9);
        prop_assert!(stats.variance_from_avg.is_finite());
        prop_assert!(stats.variance_from_min.is_finite());
    }

    #[test]
    fn stats_stay_finite_near_max(prices in prop::collection::vec(1e306f64..f64::MAX, 1..10)) {
        let stats = aggregate(10.0, &prices);
        prop_assert!(stats.avg.is_finite());
        prop_assert!(stats.avg >= stats.min * (1.0 - 1e-12));
        prop_assert!(stats.avg <= stats.max * (1.0 + 1e-12));
        prop_assert!(stats.variance_from_avg.is_finite());
        prop_assert!(stats.variance_from_min.is_finite());
    }
}

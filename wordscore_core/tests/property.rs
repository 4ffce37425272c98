//! Property-based tests for distance and scoring using proptest

use proptest::prelude::*;
use std::collections::HashSet;
use wordscore_core::{
    edit_distance, score, score_detailed, tokenize, AccuracyResult, Response, Thresholds,
};

// =========================================================================
// Strategies
// =========================================================================

/// Small alphabet so transpositions and near-misses come up often
fn arb_token() -> impl Strategy<Value = String> {
    "[abcdé]{0,8}"
}

fn arb_sentence() -> impl Strategy<Value = String> {
    prop::collection::vec("[abcdAB]{1,6}", 0..6).prop_map(|words| words.join(" "))
}

// =========================================================================
// Property: edit distance
// =========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn distance_to_self_is_zero(s in arb_token()) {
        prop_assert_eq!(edit_distance(&s, &s), 0);
    }

    #[test]
    fn distance_is_symmetric(a in arb_token(), b in arb_token()) {
        prop_assert_eq!(edit_distance(&a, &b), edit_distance(&b, &a));
    }

    #[test]
    fn distance_from_empty_is_length(s in arb_token()) {
        let len = s.chars().count();
        prop_assert_eq!(edit_distance("", &s), len);
        prop_assert_eq!(edit_distance(&s, ""), len);
    }

    #[test]
    fn distance_matches_strsim_osa(a in arb_token(), b in arb_token()) {
        prop_assert_eq!(edit_distance(&a, &b), strsim::osa_distance(&a, &b));
    }

    #[test]
    fn distance_bounded_by_longer_length(a in arb_token(), b in arb_token()) {
        let longest = a.chars().count().max(b.chars().count());
        prop_assert!(edit_distance(&a, &b) <= longest);
    }
}

// =========================================================================
// Property: scoring
// =========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn correct_never_exceeds_total(target in arb_sentence(), response in arb_sentence()) {
        let result = score(&target, &Response::from(response));
        prop_assert!(result.correct <= result.total);
        prop_assert_eq!(result.total, tokenize(&target).len());
        prop_assert!((0.0..=100.0).contains(&result.accuracy));
    }

    #[test]
    fn no_target_claimed_twice(target in arb_sentence(), response in arb_sentence()) {
        let report = score_detailed(&target, &Response::from(response), &Thresholds::default());
        let accepted: Vec<usize> = report.matches.iter()
            .filter(|m| m.accepted)
            .filter_map(|m| m.target_index)
            .collect();
        let unique: HashSet<usize> = accepted.iter().copied().collect();
        prop_assert_eq!(accepted.len(), unique.len());
        prop_assert_eq!(accepted.len(), report.result.correct);
        prop_assert_eq!(
            report.unmatched_targets.len(),
            report.result.total - report.result.correct
        );
    }

    #[test]
    fn identical_response_scores_full(target in arb_sentence()) {
        let result = score(&target, &Response::from(target.to_uppercase()));
        prop_assert_eq!(result.correct, result.total);
    }

    #[test]
    fn whitespace_response_is_blank(target in arb_sentence(), ws in "[ \t\n]{0,4}") {
        let expected = score(&target, &Response::Missing);
        prop_assert_eq!(score(&target, &Response::from(ws)), expected);
        prop_assert_eq!(score(&target, &Response::NotANumber), expected);
        prop_assert_eq!(expected, AccuracyResult::new(0, tokenize(&target).len()));
    }
}

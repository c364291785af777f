//! Token overlap scoring
//!
//! The numerator walks the token *sequence* of the first argument and counts
//! every token that appears anywhere in the second; the denominator is the
//! size of the *set* union of both. The first argument is always the
//! reference side, so the measure is deliberately asymmetric.

use crate::token::tokenize;
use std::collections::HashSet;

/// Raw overlap ratio `|{t in seq(a) : t in set(b)}| / |set(a) ∪ set(b)|`
///
/// Returns 0 when neither side has a token. The value may exceed 1 when `a`
/// repeats tokens; the reconciler uses this unclamped value when deciding
/// whether a rewrite helped.
pub fn overlap_ratio(a: &str, b: &str) -> f64 {
    let seq_a = tokenize(a);
    let set_b: HashSet<&str> = tokenize(b).into_iter().collect();

    let mut union: HashSet<&str> = seq_a.iter().copied().collect();
    union.extend(set_b.iter().copied());

    if union.is_empty() {
        return 0.0;
    }

    let shared = seq_a.iter().filter(|token| set_b.contains(*token)).count();
    shared as f64 / union.len() as f64
}

/// Similarity score in `[0, 1]` between `a` (reference) and `b`
///
/// This is [`overlap_ratio`] clamped to 1.0.
pub fn similarity(a: &str, b: &str) -> f64 {
    overlap_ratio(a, b).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_empty() {
        assert_eq!(overlap_ratio("", ""), 0.0);
        assert_eq!(similarity("", ""), 0.0);
    }

    #[test]
    fn test_one_side_empty() {
        assert_eq!(similarity("", "abc"), 0.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn test_disjoint() {
        assert_eq!(similarity("alpha", "beta"), 0.0);
    }

    #[test]
    fn test_identical_distinct_tokens() {
        assert_eq!(similarity("say(\"hi\")", "say(\"hi\")"), 1.0);
    }

    #[test]
    fn test_repeated_tokens_raise_raw_ratio() {
        // seq(a) = [a, " ", a], set union = {a, " "}
        assert!((overlap_ratio("a a", "a a") - 1.5).abs() < 1e-12);
        assert_eq!(similarity("a a", "a a"), 1.0);
    }

    #[test]
    fn test_quote_drift() {
        // say ( "hi" ) vs say ( 'hi' ): 3 shared of 5 distinct
        let score = similarity("say(\"hi\")", "say('hi')");
        assert!((score - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_missing_semicolon() {
        // x, " ", =, " ", 1 found; ";" missing; union of 5
        let score = overlap_ratio("x = 1;", "x = 1");
        assert!((score - 1.0).abs() < 1e-12);
        assert!(overlap_ratio("x = 1;", "x = 1;") > score);
    }
}

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fuzzy address matching for water service lookups.
//!
//! Given a free-text query and the normalized address list, finds the
//! single closest candidate by normalized Levenshtein similarity. Scores
//! are on a 0–100 scale where 100 is an exact match. There is no
//! confidence threshold: even a low-scoring best match is returned, and
//! deciding what to do with low confidence is the caller's concern.
//!
//! Case normalization is the caller's job: candidates come out of the
//! normalizer already lower-cased, and the query must be lower-cased
//! before matching.

use strsim::normalized_levenshtein;
use thiserror::Error;

/// Errors from address matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// The candidate list was empty.
    #[error("no candidate addresses to match against")]
    NoCandidates,
}

/// The winning candidate of a fuzzy lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AddressMatch {
    /// Index of the winning candidate in the input list.
    pub index: usize,
    /// Similarity score, 0–100. Exactly 100 for an exact match.
    pub score: f64,
}

/// Finds the candidate most similar to `query`.
///
/// Deterministic: ties are broken by first occurrence in `candidates`.
///
/// # Errors
///
/// Returns [`MatchError::NoCandidates`] if `candidates` is empty.
pub fn best_match<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
) -> Result<AddressMatch, MatchError> {
    let mut best: Option<AddressMatch> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let score = normalized_levenshtein(query, candidate.as_ref()) * 100.0;
        if best.as_ref().is_none_or(|current| score > current.score) {
            best = Some(AddressMatch { index, score });
        }
    }

    best.ok_or(MatchError::NoCandidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_scores_one_hundred() {
        let candidates = ["123 main st", "456 oak ave"];
        let m = best_match("456 oak ave", &candidates).expect("non-empty");
        assert_eq!(m.index, 1);
        assert!((m.score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn closest_candidate_wins() {
        let candidates = ["123 main street", "456 oak ave"];
        let m = best_match("123 main st", &candidates).expect("non-empty");
        assert_eq!(m.index, 0);

        let other = normalized_levenshtein("123 main st", "456 oak ave") * 100.0;
        assert!(m.score > other);
    }

    #[test]
    fn matching_is_deterministic() {
        let candidates = ["100 james st", "102 james st", "104 james st"];
        let first = best_match("103 james st", &candidates).expect("non-empty");
        let second = best_match("103 james st", &candidates).expect("non-empty");
        assert_eq!(first, second);
    }

    #[test]
    fn ties_break_to_first_occurrence() {
        let candidates = ["222 salina st", "222 salina st"];
        let m = best_match("222 salina st", &candidates).expect("non-empty");
        assert_eq!(m.index, 0);
    }

    #[test]
    fn empty_candidates_fail() {
        let candidates: [&str; 0] = [];
        assert_eq!(best_match("x", &candidates), Err(MatchError::NoCandidates));
    }

    #[test]
    fn low_confidence_match_is_still_returned() {
        let candidates = ["700 erie blvd"];
        let m = best_match("zzzzzz", &candidates).expect("non-empty");
        assert_eq!(m.index, 0);
        assert!(m.score < 50.0);
    }
}

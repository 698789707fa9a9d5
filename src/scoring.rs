//! Message risk scoring
//!
//! Turns the rules matched in one message into a [`MatchResult`].
//!
//! # Scoring Formula
//!
//! ```text
//! total_score = Σ weight(rule) for every matched rule
//!
//! severity:
//!   total_score >= 5  → HIGH
//!   total_score >= 3  → MEDIUM
//!   total_score >  0  → LOW
//!   total_score == 0  → not flagged
//! ```
//!
//! Two rules in the same category both add their weight and both count as
//! a hit for that category.

use crate::models::{Category, Rule, Severity};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Score of a single message
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub total_score: u32,
    pub matched_categories: BTreeSet<Category>,
    /// Number of matched rules per category
    pub category_hits: BTreeMap<Category, u32>,
}

impl MatchResult {
    /// Severity tier, `None` when the message is not flagged
    pub fn severity(&self) -> Option<Severity> {
        Severity::from_score(self.total_score)
    }

    pub fn is_flagged(&self) -> bool {
        self.total_score > 0
    }
}

/// Score the rules the matcher returned for one message.
pub fn score<'r>(matched: impl IntoIterator<Item = &'r Rule>) -> MatchResult {
    let mut result = MatchResult::default();
    for rule in matched {
        result.total_score = result.total_score.saturating_add(rule.weight());
        result.matched_categories.insert(rule.category());
        *result.category_hits.entry(rule.category()).or_insert(0) += 1;
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_message;
    use crate::rules::RuleSet;

    fn score_text(message: &str) -> MatchResult {
        let rules = RuleSet::builtin();
        score(match_message(message, &rules))
    }

    #[test]
    fn test_clean_message_is_unflagged() {
        let result = score_text("Hello friend, see you at 6");
        assert_eq!(result.total_score, 0);
        assert!(!result.is_flagged());
        assert_eq!(result.severity(), None);
        assert!(result.matched_categories.is_empty());
        assert!(result.category_hits.is_empty());
    }

    #[test]
    fn test_otp_alone_is_medium() {
        for msg in ["Your OTP is 1234", "your otp is 1234", "OTP"] {
            let result = score_text(msg);
            assert_eq!(result.total_score, 3, "{msg}");
            assert_eq!(result.severity(), Some(Severity::Medium), "{msg}");
        }
    }

    #[test]
    fn test_refund_plus_shortener_is_high() {
        let result = score_text("Claim your refund now bit.ly/xyz");
        assert_eq!(result.total_score, 5);
        assert_eq!(result.severity(), Some(Severity::High));
        assert_eq!(
            result.matched_categories,
            BTreeSet::from([Category::Link, Category::Offer])
        );
    }

    #[test]
    fn test_same_category_hits_accumulate() {
        // KYC (3) + verify (2) + UPI (3), all bank
        let result = score_text("Verify KYC for your UPI wallet");
        assert_eq!(result.total_score, 8);
        assert_eq!(result.category_hits.get(&Category::Bank), Some(&3));
        assert_eq!(result.matched_categories.len(), 1);
    }

    #[test]
    fn test_severity_boundaries() {
        let rules = RuleSet::from_rules([
            Rule::new("one", Category::Offer, 1),
            Rule::new("two", Category::Offer, 2),
            Rule::new("three", Category::Otp, 3),
            Rule::new("five", Category::Link, 5),
        ])
        .unwrap();
        let tier = |msg: &str| score(match_message(msg, &rules)).severity();

        assert_eq!(tier("nothing here"), None);
        assert_eq!(tier("one"), Some(Severity::Low));
        assert_eq!(tier("two"), Some(Severity::Low));
        assert_eq!(tier("three"), Some(Severity::Medium));
        assert_eq!(tier("one three"), Some(Severity::Medium));
        assert_eq!(tier("two three"), Some(Severity::High));
        assert_eq!(tier("five"), Some(Severity::High));
    }

    #[test]
    fn test_score_is_pure() {
        let msg = "Reset your PAN details at example.cn";
        assert_eq!(score_text(msg), score_text(msg));
    }

    #[test]
    fn test_empty_match_list() {
        assert_eq!(score(Vec::<&Rule>::new()), MatchResult::default());
    }
}

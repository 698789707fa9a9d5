//! Running statistics across a stream of messages
//!
//! The [`Aggregator`] is owned by the loop that drives a scan and is
//! mutated once per message. If scanning is ever spread over threads, the
//! matcher and scorer can run anywhere but every `record_*` call still has
//! to go through the one owner of the aggregator.

use crate::models::Category;
use crate::scoring::MatchResult;
use serde::Serialize;
use std::collections::BTreeMap;

/// Point-in-time copy of the aggregate counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    pub total_scanned: u64,
    pub total_flagged: u64,
    /// Matched-rule count per category, summed over all flagged messages
    pub category_counts: BTreeMap<Category, u64>,
}

impl AggregateStats {
    /// Categories with a non-zero count, in lexicographic order
    pub fn nonzero_categories(&self) -> impl Iterator<Item = (Category, u64)> + '_ {
        self.category_counts
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(&category, &count)| (category, count))
    }
}

#[derive(Debug, Default)]
pub struct Aggregator {
    stats: AggregateStats,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one scanned (non-empty) message, flagged or not.
    pub fn record_message(&mut self) {
        self.stats.total_scanned += 1;
    }

    /// Count a flagged message and add its per-category rule hits.
    ///
    /// Results with a zero score are ignored.
    pub fn record_match(&mut self, result: &MatchResult) {
        if !result.is_flagged() {
            return;
        }
        self.stats.total_flagged += 1;
        for (&category, &hits) in &result.category_hits {
            *self.stats.category_counts.entry(category).or_insert(0) += u64::from(hits);
        }
    }

    pub fn snapshot(&self) -> AggregateStats {
        self.stats.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_message;
    use crate::rules::RuleSet;
    use crate::scoring::score;

    fn run(messages: &[&str]) -> AggregateStats {
        let rules = RuleSet::builtin();
        let mut agg = Aggregator::new();
        for msg in messages {
            agg.record_message();
            let result = score(match_message(msg, &rules));
            if result.is_flagged() {
                agg.record_match(&result);
            }
        }
        agg.snapshot()
    }

    #[test]
    fn test_empty_stream() {
        let stats = Aggregator::new().snapshot();
        assert_eq!(stats, AggregateStats::default());
        assert_eq!(stats.nonzero_categories().count(), 0);
    }

    #[test]
    fn test_reference_stream() {
        let stats = run(&[
            "Your OTP is 1234",
            "Hello friend",
            "Claim your refund now bit.ly/xyz",
        ]);
        assert_eq!(stats.total_scanned, 3);
        assert_eq!(stats.total_flagged, 2);
        let cats: Vec<(Category, u64)> = stats.nonzero_categories().collect();
        assert_eq!(
            cats,
            vec![(Category::Link, 1), (Category::Offer, 1), (Category::Otp, 1)]
        );
    }

    #[test]
    fn test_counts_are_per_rule_hit() {
        // KYC + verify + UPI: three bank rules in one message
        let stats = run(&["Verify KYC for your UPI wallet"]);
        assert_eq!(stats.total_flagged, 1);
        assert_eq!(stats.category_counts.get(&Category::Bank), Some(&3));
    }

    #[test]
    fn test_additivity() {
        let messages = [
            "Your OTP is 1234",
            "lunch at 1?",
            "Your OTP is 9876",
            "Win a prize! tinyurl.com/p",
            "ok",
        ];
        let stats = run(&messages);
        assert_eq!(stats.total_scanned, 5);
        assert_eq!(stats.total_flagged, 3);
        assert_eq!(stats.category_counts.get(&Category::Otp), Some(&2));
        assert_eq!(stats.category_counts.get(&Category::Offer), Some(&1));
        assert_eq!(stats.category_counts.get(&Category::Link), Some(&1));
        assert!(stats.total_flagged <= stats.total_scanned);
    }

    #[test]
    fn test_zero_score_match_is_ignored() {
        let mut agg = Aggregator::new();
        agg.record_message();
        agg.record_match(&MatchResult::default());
        let stats = agg.snapshot();
        assert_eq!(stats.total_scanned, 1);
        assert_eq!(stats.total_flagged, 0);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut agg = Aggregator::new();
        agg.record_message();
        let before = agg.snapshot();
        agg.record_message();
        assert_eq!(before.total_scanned, 1);
        assert_eq!(agg.snapshot().total_scanned, 2);
    }
}

//! Case-insensitive substring matcher
//!
//! A rule matches when its lowered pattern occurs anywhere in the lowered
//! message. There are no word boundaries: `pan` hits inside `Japan`, and
//! that is intended. Each rule matches at most once per message no matter
//! how often its pattern repeats.

use crate::models::Rule;
use crate::rules::RuleSet;

/// Rules from `rules` whose pattern occurs in `message`, in rule-set order.
///
/// The message is lowered once per call; each rule searches with the
/// finder it built at construction.
///
/// Empty messages are the caller's concern; for an empty message this
/// returns nothing because every rule pattern is non-empty.
pub fn match_message<'r>(message: &str, rules: &'r RuleSet) -> Vec<&'r Rule> {
    let lowered = message.to_lowercase();
    let haystack = lowered.as_bytes();
    rules
        .rules()
        .iter()
        .filter(|rule| rule.is_found_in(haystack))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    fn patterns<'a>(matched: &[&'a Rule]) -> Vec<&'a str> {
        matched.iter().map(|r| r.pattern()).collect()
    }

    #[test]
    fn test_no_match() {
        let rules = RuleSet::builtin();
        assert!(match_message("Hello friend", &rules).is_empty());
        assert!(match_message("", &rules).is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let rules = RuleSet::builtin();
        let upper = match_message("Your OTP is 1234", &rules);
        let lower = match_message("your otp is 1234", &rules);
        assert_eq!(upper, lower);
        assert_eq!(patterns(&upper), vec!["OTP"]);
    }

    #[test]
    fn test_presence_not_count() {
        let rules = RuleSet::builtin();
        let matched = match_message("OTP otp OtP", &rules);
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_order_follows_rule_set() {
        let rules = RuleSet::builtin();
        let matched = match_message("bit.ly/abc claim your refund, KYC pending", &rules);
        assert_eq!(patterns(&matched), vec!["KYC", "refund", "bit.ly"]);
    }

    #[test]
    fn test_substring_collisions_are_hits() {
        let rules = RuleSet::builtin();
        // "pan" inside "Japan", "reset" inside "preset"
        assert_eq!(patterns(&match_message("Visit Japan", &rules)), vec!["PAN"]);
        assert_eq!(patterns(&match_message("load the preset", &rules)), vec!["reset"]);
    }

    #[test]
    fn test_pattern_with_punctuation() {
        let rules = RuleSet::builtin();
        let matched = match_message("Mega sale 90% OFF at shop.ru", &rules);
        assert_eq!(patterns(&matched), vec!["90% off", ".ru"]);
    }

    #[test]
    fn test_custom_rule_set() {
        let rules = RuleSet::from_rules([Rule::new("Lottery", Category::Offer, 4)]).unwrap();
        let matched = match_message("you won the LOTTERY", &rules);
        assert_eq!(patterns(&matched), vec!["Lottery"]);
        assert!(match_message("Your OTP is 1234", &rules).is_empty());
    }

    #[test]
    fn test_non_ascii_message() {
        let rules = RuleSet::builtin();
        let matched = match_message("₹4,999 refund pending — tap tinyurl.com/x", &rules);
        assert_eq!(patterns(&matched), vec!["refund", "tinyurl"]);
    }

    #[test]
    fn test_idempotent() {
        let rules = RuleSet::builtin();
        let msg = "Verify your UPI now";
        assert_eq!(match_message(msg, &rules), match_message(msg, &rules));
    }
}

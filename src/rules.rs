//! Fraud-indicator rule set
//!
//! A [`RuleSet`] is built once at startup and handed to the matcher by
//! reference. It never changes after construction, so it can be shared
//! freely (it is `Send + Sync`).
//!
//! The built-in table covers four families of SMS fraud:
//!
//! - **bank**: KYC/UPI/identity-document pretexts and account-block threats
//! - **otp**: requests for one-time passwords and credential resets
//! - **offer**: refunds, prizes, gifts and discount bait
//! - **link**: URL shorteners and suspicious country TLDs

use crate::error::RuleError;
use crate::models::{Category, Rule};
use tracing::debug;

/// Built-in indicator table: (pattern, category, weight)
const BUILTIN_RULES: &[(&str, Category, u32)] = &[
    ("KYC", Category::Bank, 3),
    ("account blocked", Category::Bank, 3),
    ("verify", Category::Bank, 2),
    ("UPI", Category::Bank, 3),
    ("Aadhaar", Category::Bank, 3),
    ("PAN", Category::Bank, 3),
    ("OTP", Category::Otp, 3),
    ("reset", Category::Otp, 2),
    ("refund", Category::Offer, 2),
    ("90% off", Category::Offer, 2),
    ("prize", Category::Offer, 2),
    ("gift", Category::Offer, 1),
    ("bit.ly", Category::Link, 3),
    ("tinyurl", Category::Link, 3),
    (".cn", Category::Link, 2),
    (".ru", Category::Link, 2),
];

/// Immutable, ordered collection of rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// The built-in indicator table
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES
                .iter()
                .map(|&(pattern, category, weight)| Rule::new(pattern, category, weight))
                .collect(),
        }
    }

    /// Build a rule set from arbitrary rules.
    ///
    /// Patterns that are equal after lower-casing collapse into one entry:
    /// the later rule replaces the earlier one in place, keeping the
    /// earlier position.
    pub fn from_rules(rules: impl IntoIterator<Item = Rule>) -> Result<Self, RuleError> {
        let mut out: Vec<Rule> = Vec::new();
        for rule in rules {
            if rule.lowered().is_empty() {
                return Err(RuleError::EmptyPattern);
            }
            if rule.weight() == 0 {
                return Err(RuleError::ZeroWeight {
                    pattern: rule.pattern().to_string(),
                });
            }
            match out.iter_mut().find(|r| r.lowered() == rule.lowered()) {
                Some(existing) => {
                    debug!("Rule '{}' overrides '{}'", rule.pattern(), existing.pattern());
                    *existing = rule;
                }
                None => out.push(rule),
            }
        }
        Ok(Self { rules: out })
    }

    /// Rules in table order
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Copy of this set with the given patterns removed (case-insensitive).
    ///
    /// A pattern is unknown only if it is absent from this set, so listing
    /// the same pattern twice in different case is fine.
    pub fn without(&self, patterns: &[String]) -> Result<Self, RuleError> {
        let mut disabled: Vec<String> = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            let lowered = pattern.to_lowercase();
            if !self.rules.iter().any(|r| r.lowered() == lowered) {
                return Err(RuleError::UnknownPattern {
                    pattern: pattern.clone(),
                });
            }
            disabled.push(lowered);
        }
        let rules = self
            .rules
            .iter()
            .filter(|r| !disabled.iter().any(|d| d == r.lowered()))
            .cloned()
            .collect();
        Ok(Self { rules })
    }

    /// Copy of this set extended with more rules, same collapsing as
    /// [`RuleSet::from_rules`].
    pub fn extended(&self, extra: impl IntoIterator<Item = Rule>) -> Result<Self, RuleError> {
        Self::from_rules(self.rules.iter().cloned().chain(extra))
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

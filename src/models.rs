//! Core data models for smsguard
//!
//! These models are shared by the rule set, the matcher, the scorer and
//! the reporters.

use memchr::memmem::Finder;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fraud-indicator category.
///
/// Variants are declared in alphabetical order of their names so the derived
/// `Ord` gives the lexicographic order used for category stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// KYC, UPI, account-block and identity-document lures
    Bank,
    /// Shortened links and suspicious top-level domains
    Link,
    /// Refunds, prizes, gifts and discount bait
    Offer,
    /// One-time-password and credential-reset phishing
    Otp,
}

impl Category {
    pub const ALL: [Category; 4] = [Category::Bank, Category::Link, Category::Offer, Category::Otp];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bank => "bank",
            Category::Link => "link",
            Category::Offer => "offer",
            Category::Otp => "otp",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bank" => Ok(Category::Bank),
            "link" => Ok(Category::Link),
            "offer" => Ok(Category::Offer),
            "otp" => Ok(Category::Otp),
            _ => Err(anyhow::anyhow!(
                "Unknown category '{}'. Valid categories: bank, link, offer, otp",
                s
            )),
        }
    }
}

/// Severity tier of a flagged message
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[serde(alias = "low")]
    Low,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Severity {
    /// Tier for a total score. `None` means the message is not flagged.
    pub fn from_score(score: u32) -> Option<Severity> {
        match score {
            s if s >= 5 => Some(Severity::High),
            s if s >= 3 => Some(Severity::Medium),
            s if s > 0 => Some(Severity::Low),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

impl FromStr for Severity {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(anyhow::anyhow!(
                "Unknown severity '{}'. Valid severities: low, medium, high",
                s
            )),
        }
    }
}

/// A single fraud-indicator rule.
///
/// Built through [`Rule::new`] so the lowered pattern and its substring
/// searcher are computed once and never drift from `pattern`.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    pattern: String,
    category: Category,
    weight: u32,
    #[serde(skip)]
    lowered: String,
    #[serde(skip)]
    finder: Finder<'static>,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, category: Category, weight: u32) -> Self {
        let pattern = pattern.into();
        let lowered = pattern.to_lowercase();
        let finder = Finder::new(lowered.as_bytes()).into_owned();
        Self {
            pattern,
            category,
            weight,
            lowered,
            finder,
        }
    }

    /// Whether the lowered pattern occurs in `haystack`, which the caller
    /// must already have lower-cased.
    pub fn is_found_in(&self, haystack: &[u8]) -> bool {
        self.finder.find(haystack).is_some()
    }

    /// Pattern as written in the rule table
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Pattern lower-cased at construction, used for matching
    pub fn lowered(&self) -> &str {
        &self.lowered
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }
}

// The finder is derived from `lowered`, so it takes no part in equality.
impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern
            && self.category == other.category
            && self.weight == other.weight
    }
}

impl Eq for Rule {}

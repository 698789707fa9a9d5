//! smsguard - rule-based SMS fraud screening
//!
//! Scans short text messages for known fraud-indicator substrings, adds up
//! a weighted risk score per message, tags flagged messages with a
//! severity, and keeps running statistics over the stream.
//!
//! ```
//! use smsguard::{matcher::match_message, rules::RuleSet, scoring::score, models::Severity};
//!
//! let rules = RuleSet::builtin();
//! let result = score(match_message("Your OTP is 1234", &rules));
//! assert_eq!(result.total_score, 3);
//! assert_eq!(result.severity(), Some(Severity::Medium));
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod models;
pub mod reporters;
pub mod rules;
pub mod scanner;
pub mod scoring;
pub mod stats;

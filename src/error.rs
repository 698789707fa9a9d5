//! Error types for the I/O and rule-construction edges of smsguard
//!
//! Matching, scoring and aggregation are total functions and have no
//! error type of their own.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading the message source
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Cannot open {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read line {line} of {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while building a rule set from user-supplied rules
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RuleError {
    #[error("Rule pattern must not be empty")]
    EmptyPattern,

    #[error("Rule '{pattern}' has weight 0; weights must be positive")]
    ZeroWeight { pattern: String },

    #[error("Cannot disable '{pattern}': no such rule")]
    UnknownPattern { pattern: String },
}

pub type ScanResult<T> = Result<T, ScanError>;

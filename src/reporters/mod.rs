//! Output reporters for smsguard scan results
//!
//! Supports two output formats:
//! - `text` - one `[SUSPECT:<SEVERITY>]` line per flagged message, then a summary
//! - `json` - the whole scan report as pretty-printed JSON

mod json;
mod text;

pub use text::{render_rules, render_stats, render_summary, render_verdict};

use crate::scanner::ScanReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!("Unknown format '{}'. Valid formats: text, json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Render a complete scan report in the given format
pub fn report(report: &ScanReport, format: OutputFormat, show_stats: bool) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::render(report, show_stats)),
        OutputFormat::Json => json::render(report),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::rules::RuleSet;
    use crate::scanner::Scanner;
    use std::io::Cursor;
    use std::path::Path;

    /// Scan the three-message reference stream
    pub(crate) fn test_report() -> ScanReport {
        let rules = RuleSet::builtin();
        let input = "Your OTP is 1234\nHello friend\nClaim your refund now bit.ly/xyz\n";
        Scanner::new(&rules)
            .scan_to_report(Cursor::new(input.as_bytes().to_vec()), Path::new("test.txt"))
            .expect("scan")
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("sarif").is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_report_dispatch() {
        let r = test_report();
        let text = report(&r, OutputFormat::Text, false).unwrap();
        assert!(text.starts_with("[SUSPECT:MEDIUM]"));
        let json = report(&r, OutputFormat::Json, false).unwrap();
        assert!(json.trim_start().starts_with('{'));
    }
}

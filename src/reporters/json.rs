//! JSON reporter
//!
//! Outputs the full ScanReport as pretty-printed JSON.
//! Useful for piping to jq or feeding another tool.

use crate::scanner::ScanReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &ScanReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::test_report;

    #[test]
    fn test_json_render_valid() {
        let json_str = render(&test_report()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");

        assert_eq!(parsed["stats"]["total_scanned"], 3);
        assert_eq!(parsed["stats"]["total_flagged"], 2);
        assert_eq!(parsed["stats"]["category_counts"]["link"], 1);
        assert!(parsed["stats"]["category_counts"].get("bank").is_none());

        let verdicts = parsed["verdicts"].as_array().expect("verdicts array");
        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[1]["severity"], "HIGH");
        assert_eq!(verdicts[1]["total_score"], 5);
        assert_eq!(verdicts[1]["line"], 3);
        assert_eq!(verdicts[1]["patterns"][0], "refund");
        assert_eq!(verdicts[1]["category_hits"]["offer"], 1);
    }

    #[test]
    fn test_json_empty_report() {
        let json_str = render(&ScanReport::default()).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["verdicts"].as_array().expect("verdicts array").len(), 0);
        assert_eq!(parsed["stats"]["total_scanned"], 0);
    }
}

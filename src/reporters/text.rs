//! Text (terminal) reporter
//!
//! Line formats are part of the CLI contract:
//!
//! ```text
//! [SUSPECT:HIGH] Claim your refund now bit.ly/xyz
//! Scanned 3 messages, flagged 2
//! Category stats:
//!   link: 1
//! ```

use crate::rules::RuleSet;
use crate::scanner::{ScanReport, Verdict};
use crate::stats::AggregateStats;
use console::style;

/// One flagged message
pub fn render_verdict(verdict: &Verdict) -> String {
    format!("[SUSPECT:{}] {}", verdict.severity, verdict.message)
}

/// Summary line printed after the stream ends
pub fn render_summary(stats: &AggregateStats) -> String {
    format!(
        "Scanned {} messages, flagged {}",
        stats.total_scanned, stats.total_flagged
    )
}

/// Per-category block shown with `--stats`.
///
/// `styled` bolds the header for a terminal. Anything written to a file or
/// returned by [`render`] must stay plain.
pub fn render_stats(stats: &AggregateStats, styled: bool) -> String {
    let header = "Category stats:";
    let mut out = if styled {
        format!("{}\n", style(header).bold())
    } else {
        format!("{}\n", header)
    };
    for (category, count) in stats.nonzero_categories() {
        out.push_str(&format!("  {}: {}\n", category, count));
    }
    out
}

/// Full text report: verdicts, summary, optional stats. Never styled.
pub fn render(report: &ScanReport, show_stats: bool) -> String {
    let mut out = String::new();
    for verdict in &report.verdicts {
        out.push_str(&render_verdict(verdict));
        out.push('\n');
    }
    out.push_str(&render_summary(&report.stats));
    out.push('\n');
    if show_stats {
        out.push_str(&render_stats(&report.stats, false));
    }
    out
}

/// Rule table listing for `smsguard rules`
pub fn render_rules(rules: &RuleSet) -> String {
    let mut out = format!(
        "{}\n",
        style(format!("{:<20} {:<8} {:>6}", "PATTERN", "CATEGORY", "WEIGHT")).dim()
    );
    for rule in rules {
        out.push_str(&format!(
            "{:<20} {:<8} {:>6}\n",
            rule.pattern(),
            rule.category().as_str(),
            rule.weight()
        ));
    }
    out.push_str(&format!("{} rules\n", rules.len()));
    out
}

//! Line-by-line scan driver
//!
//! Reads messages from a text source, one per line, and runs each through
//! matcher → scorer → aggregator. A line is empty, and skipped before it
//! reaches the core, when nothing is left after removing its `\n` or `\r\n`
//! ending. Lines holding only spaces or tabs are still messages.

use crate::error::{ScanError, ScanResult};
use crate::matcher::match_message;
use crate::models::Severity;
use crate::rules::RuleSet;
use crate::scoring::{score, MatchResult};
use crate::stats::{AggregateStats, Aggregator};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use tracing::{debug, trace};

/// Verdict for one flagged message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// 1-based line number in the source
    pub line: usize,
    pub message: String,
    pub severity: Severity,
    /// Patterns that matched, in rule-set order
    pub patterns: Vec<String>,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Everything a scan produced
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub verdicts: Vec<Verdict>,
    pub stats: AggregateStats,
}

impl ScanReport {
    /// Highest severity among the flagged messages
    pub fn max_severity(&self) -> Option<Severity> {
        self.verdicts.iter().map(|v| v.severity).max()
    }
}

/// Score one message against `rules`, returning a verdict when flagged.
pub fn check_message(line: usize, message: &str, rules: &RuleSet) -> Option<Verdict> {
    let matched = match_message(message, rules);
    let patterns = matched.iter().map(|r| r.pattern().to_string()).collect();
    let result = score(matched);
    let severity = result.severity()?;
    Some(Verdict {
        line,
        message: message.to_string(),
        severity,
        patterns,
        result,
    })
}

/// Open a message source. `-` means stdin.
pub fn open_source(path: &Path) -> ScanResult<Box<dyn BufRead>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).map_err(|source| ScanError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Box::new(BufReader::new(file)))
}

/// Scans a message stream with a fixed rule set
pub struct Scanner<'r> {
    rules: &'r RuleSet,
}

impl<'r> Scanner<'r> {
    pub fn new(rules: &'r RuleSet) -> Self {
        Self { rules }
    }

    /// Scan every line of `reader`.
    ///
    /// `on_verdict` runs for each flagged message as soon as it is scored,
    /// so callers can print verdicts inline. A read error aborts the scan
    /// and no stats are returned.
    pub fn scan<R, F>(&self, mut reader: R, source: &Path, mut on_verdict: F) -> ScanResult<AggregateStats>
    where
        R: BufRead,
        F: FnMut(&Verdict),
    {
        let mut aggregator = Aggregator::new();
        let mut buf = Vec::new();
        let mut line_no = 0usize;

        loop {
            buf.clear();
            let read = reader
                .read_until(b'\n', &mut buf)
                .map_err(|err| ScanError::ReadFailed {
                    path: source.to_path_buf(),
                    line: line_no + 1,
                    source: err,
                })?;
            if read == 0 {
                break;
            }
            line_no += 1;

            let text = String::from_utf8_lossy(trim_line_ending(&buf));
            if text.is_empty() {
                trace!("Skipping empty line {}", line_no);
                continue;
            }

            aggregator.record_message();
            if let Some(verdict) = check_message(line_no, &text, self.rules) {
                debug!(
                    "Line {} flagged {} (score {})",
                    line_no, verdict.severity, verdict.result.total_score
                );
                aggregator.record_match(&verdict.result);
                on_verdict(&verdict);
            }
        }

        Ok(aggregator.snapshot())
    }

    /// Scan `reader` and keep every verdict.
    pub fn scan_to_report<R: BufRead>(&self, reader: R, source: &Path) -> ScanResult<ScanReport> {
        let mut verdicts = Vec::new();
        let stats = self.scan(reader, source, |v| verdicts.push(v.clone()))?;
        Ok(ScanReport { verdicts, stats })
    }
}

fn trim_line_ending(buf: &[u8]) -> &[u8] {
    let buf = buf.strip_suffix(b"\n").unwrap_or(buf);
    buf.strip_suffix(b"\r").unwrap_or(buf)
}

//! Scan command - verdicts for a file of messages

use anyhow::{Context, Result};
use console::style;
use smsguard::config::ProjectConfig;
use smsguard::models::Severity;
use smsguard::reporters::{self, OutputFormat};
use smsguard::scanner::{open_source, ScanReport, Scanner};
use std::path::Path;
use std::str::FromStr;
use std::time::Instant;
use tracing::info;

/// Effective scan settings after merging CLI flags with config defaults
#[derive(Debug, Clone, PartialEq)]
struct ScanSettings {
    show_stats: bool,
    format: OutputFormat,
    fail_on: Option<Severity>,
}

fn apply_config_defaults(
    stats: bool,
    format: Option<String>,
    fail_on: Option<String>,
    config: &ProjectConfig,
) -> Result<ScanSettings> {
    let format = match format.or_else(|| config.defaults.format.clone()) {
        Some(f) => OutputFormat::from_str(&f)?,
        None => OutputFormat::Text,
    };
    let fail_on = match fail_on {
        Some(s) => Some(Severity::from_str(&s)?),
        None => config.defaults.fail_on,
    };
    Ok(ScanSettings {
        show_stats: stats || config.defaults.stats.unwrap_or(false),
        format,
        fail_on,
    })
}

/// Run the scan command
pub fn run(
    input: &Path,
    stats: bool,
    format: Option<String>,
    fail_on: Option<String>,
    output: Option<&Path>,
    config: &ProjectConfig,
) -> Result<()> {
    let settings = apply_config_defaults(stats, format, fail_on, config)?;
    let rules = super::build_rules(config)?;
    let reader = open_source(input)?;
    let scanner = Scanner::new(&rules);
    let start = Instant::now();

    // Text to stdout streams verdicts as they are found; everything else is
    // rendered once the stream ends.
    let outcome = if settings.format == OutputFormat::Text && output.is_none() {
        let mut max_severity: Option<Severity> = None;
        let stats = scanner.scan(reader, input, |verdict| {
            max_severity = max_severity.max(Some(verdict.severity));
            println!("{}", reporters::render_verdict(verdict));
        })?;
        println!("{}", reporters::render_summary(&stats));
        if settings.show_stats {
            print!("{}", reporters::render_stats(&stats, true));
        }
        Outcome {
            scanned: stats.total_scanned,
            max_severity,
        }
    } else {
        let report = scanner.scan_to_report(reader, input)?;
        let rendered = reporters::report(&report, settings.format, settings.show_stats)?;
        write_report(&rendered, output)?;
        Outcome::from(&report)
    };

    info!(
        "Scanned {} messages from {} in {:.2?}",
        outcome.scanned,
        input.display(),
        start.elapsed()
    );

    check_fail_threshold(settings.fail_on, outcome.max_severity);
    Ok(())
}

/// What the fail-on check needs from a finished scan
struct Outcome {
    scanned: u64,
    max_severity: Option<Severity>,
}

impl From<&ScanReport> for Outcome {
    fn from(report: &ScanReport) -> Self {
        Self {
            scanned: report.stats.total_scanned,
            max_severity: report.max_severity(),
        }
    }
}

fn write_report(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            eprintln!("Report written to: {}", style(path.display()).cyan());
        }
        None => {
            print!("{}", rendered);
            if !rendered.ends_with('\n') {
                println!();
            }
        }
    }
    Ok(())
}

/// Exit with code 1 when a flagged message reached the fail-on severity
fn check_fail_threshold(fail_on: Option<Severity>, max_severity: Option<Severity>) {
    if should_fail(fail_on, max_severity) {
        if let Some(threshold) = fail_on {
            eprintln!("Failing due to --fail-on={} threshold", threshold);
        }
        std::process::exit(1);
    }
}

fn should_fail(fail_on: Option<Severity>, max_severity: Option<Severity>) -> bool {
    match (fail_on, max_severity) {
        (Some(threshold), Some(max)) => max >= threshold,
        _ => false,
    }
}

//! Check command - score messages passed as arguments

use anyhow::Result;
use console::style;
use serde::Serialize;
use smsguard::matcher::match_message;
use smsguard::models::{Rule, Severity};
use smsguard::rules::RuleSet;
use smsguard::scoring::{score, MatchResult};

/// Per-message breakdown
#[derive(Debug, Serialize)]
struct CheckResult<'a> {
    message: &'a str,
    severity: Option<Severity>,
    matched: Vec<&'a Rule>,
    #[serde(flatten)]
    result: MatchResult,
}

fn check<'a>(message: &'a str, rules: &'a RuleSet) -> CheckResult<'a> {
    let matched = match_message(message, rules);
    let result = score(matched.iter().copied());
    CheckResult {
        message,
        severity: result.severity(),
        matched,
        result,
    }
}

fn render_text(checked: &CheckResult<'_>) -> String {
    let tag = match checked.severity {
        Some(sev) => format!("[SUSPECT:{}]", sev),
        None => style("[CLEAN]").green().to_string(),
    };
    let mut out = format!("{} {}\n", tag, checked.message);
    for rule in &checked.matched {
        out.push_str(&format!(
            "  + {:<16} {:<6} {}\n",
            rule.pattern(),
            rule.category().as_str(),
            rule.weight()
        ));
    }
    out.push_str(&format!("  = score {}\n", checked.result.total_score));
    out
}

/// Run the check command
pub fn run(messages: &[String], format: &str, rules: &RuleSet) -> Result<()> {
    let checked: Vec<CheckResult<'_>> = messages
        .iter()
        .filter(|m| !m.is_empty())
        .map(|m| check(m, rules))
        .collect();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&checked)?);
        return Ok(());
    }

    for c in &checked {
        print!("{}", render_text(c));
    }
    Ok(())
}

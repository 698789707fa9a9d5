//! Rules command - list the effective rule table

use anyhow::Result;
use smsguard::reporters;
use smsguard::rules::RuleSet;

/// Run the rules command
pub fn run(rules: &RuleSet, format: &str) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(rules.rules())?);
    } else {
        print!("{}", reporters::render_rules(rules));
    }
    Ok(())
}

//! CLI command definitions and handlers

mod check;
mod init;
mod rules;
mod scan;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use smsguard::config::{load_config_file, load_project_config, ProjectConfig};
use smsguard::rules::RuleSet;
use std::path::{Path, PathBuf};

/// smsguard - rule-based SMS fraud screening
#[derive(Parser, Debug)]
#[command(name = "smsguard")]
#[command(
    version,
    about = "Flag suspicious SMS messages using weighted fraud-indicator rules",
    long_about = "smsguard scans text messages, one per line, for bank, OTP, link and offer \
lures. Every matched indicator adds its weight to the message score; flagged messages \
are printed with a LOW, MEDIUM or HIGH severity tag.",
    after_help = "\
Examples:
  smsguard scan inbox.txt                   Flag suspicious lines
  smsguard scan inbox.txt --stats           Add per-category hit counts
  cat inbox.txt | smsguard scan -           Read messages from stdin
  smsguard scan inbox.txt --format json     JSON output for scripting
  smsguard check \"Your OTP is 1234\"         Score a single message
  smsguard rules                            List the active rules"
)]
pub struct Cli {
    /// Config file (default: ./smsguard.toml or ./.smsguardrc.json if present)
    #[arg(long, global = true, env = "SMSGUARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a file of messages, one message per line
    #[command(after_help = "\
Examples:
  smsguard scan sms.txt                        Verdicts and summary
  smsguard scan sms.txt --stats                Include category stats
  smsguard scan sms.txt --fail-on high         Exit code 1 if any HIGH message (CI mode)
  smsguard scan sms.txt -f json -o report.json Write a JSON report")]
    Scan {
        /// Message file, or `-` for stdin
        input: PathBuf,

        /// Print per-category hit counts after the summary
        #[arg(long)]
        stats: bool,

        /// Output format: text, json
        #[arg(long, short = 'f', value_parser = ["text", "json"])]
        format: Option<String>,

        /// Exit with code 1 if any message reaches this severity
        #[arg(long, value_parser = ["low", "medium", "high"])]
        fail_on: Option<String>,

        /// Write the report to a file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Score messages given on the command line and show which rules hit
    Check {
        /// Messages to score
        #[arg(required = true)]
        messages: Vec<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// List the active rule set
    Rules {
        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write an example smsguard.toml
    Init {
        /// Directory to write the config into
        #[arg(default_value = ".")]
        path: PathBuf,
    },
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Scan {
            input,
            stats,
            format,
            fail_on,
            output,
        } => {
            let config = resolve_config(cli.config.as_deref())?;
            scan::run(&input, stats, format, fail_on, output.as_deref(), &config)
        }

        Commands::Check { messages, format } => {
            let config = resolve_config(cli.config.as_deref())?;
            let rules = build_rules(&config)?;
            check::run(&messages, &format, &rules)
        }

        Commands::Rules { format } => {
            let config = resolve_config(cli.config.as_deref())?;
            let rules = build_rules(&config)?;
            rules::run(&rules, &format)
        }

        Commands::Init { path } => init::run(&path),
    }
}

/// Explicit `--config` must load; otherwise look in the working directory.
fn resolve_config(explicit: Option<&Path>) -> Result<ProjectConfig> {
    match explicit {
        Some(path) => load_config_file(path),
        None => Ok(load_project_config(Path::new("."))),
    }
}

fn build_rules(config: &ProjectConfig) -> Result<RuleSet> {
    config
        .rule_set()
        .context("Invalid rule configuration")
}

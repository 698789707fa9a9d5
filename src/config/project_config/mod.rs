//! Project-level configuration support
//!
//! Loads configuration from `smsguard.toml` or `.smsguardrc.json` in the
//! working directory, or from an explicit `--config` path.
//!
//! # Configuration Format
//!
//! ```toml
//! # smsguard.toml
//!
//! [rules]
//! skip_defaults = false
//! disable = ["gift"]
//!
//! [[rules.extra]]
//! pattern = "lottery"
//! category = "offer"
//! weight = 3
//!
//! [defaults]
//! stats = true
//! format = "text"
//! fail_on = "high"
//! ```

use crate::error::RuleError;
use crate::models::{Category, Rule, Severity};
use crate::rules::RuleSet;
use anyhow::Context;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Preferred config file name
pub const CONFIG_FILE_NAME: &str = "smsguard.toml";

/// JSON alternative to [`CONFIG_FILE_NAME`]
pub const JSON_CONFIG_FILE_NAME: &str = ".smsguardrc.json";

/// Project-level configuration loaded from smsguard.toml or similar
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Rule table adjustments
    #[serde(default)]
    pub rules: RulesConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Adjustments applied on top of the built-in rule table
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RulesConfig {
    /// Start from an empty table instead of the built-in one
    #[serde(default)]
    pub skip_defaults: bool,

    /// Built-in patterns to drop (case-insensitive)
    #[serde(default)]
    pub disable: Vec<String>,

    /// Additional rules, appended after the built-in ones
    #[serde(default)]
    pub extra: Vec<RuleConfig>,
}

/// One user-defined rule
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub pattern: String,
    pub category: Category,
    pub weight: u32,
}

impl From<&RuleConfig> for Rule {
    fn from(cfg: &RuleConfig) -> Self {
        Rule::new(cfg.pattern.clone(), cfg.category, cfg.weight)
    }
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliDefaults {
    /// Print per-category stats after the summary
    #[serde(default)]
    pub stats: Option<bool>,

    /// Default output format (text, json)
    #[serde(default)]
    pub format: Option<String>,

    /// Fail-on severity threshold for CI
    #[serde(default)]
    pub fail_on: Option<Severity>,
}

impl ProjectConfig {
    /// Build the effective rule set.
    ///
    /// `disable` is applied to the built-in table before `extra` is
    /// appended, so an extra rule may reintroduce a disabled pattern with a
    /// new weight.
    pub fn rule_set(&self) -> Result<RuleSet, RuleError> {
        let base = if self.rules.skip_defaults {
            if !self.rules.disable.is_empty() {
                warn!("rules.disable has no effect when rules.skip_defaults = true");
            }
            RuleSet::from_rules(std::iter::empty::<Rule>())?
        } else {
            RuleSet::builtin().without(&self.rules.disable)?
        };
        let rules = base.extended(self.rules.extra.iter().map(Rule::from))?;
        debug!("Effective rule set has {} rules", rules.len());
        Ok(rules)
    }
}

/// Load project configuration from `dir`.
///
/// Searches for configuration files in this order:
/// 1. `smsguard.toml`
/// 2. `.smsguardrc.json`
///
/// A file that fails to parse is logged and skipped. Returns the default
/// configuration if nothing usable is found.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    let toml_path = dir.join(CONFIG_FILE_NAME);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(JSON_CONFIG_FILE_NAME);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {:#}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from an explicit path. Unlike
/// [`load_project_config`], any failure is an error.
pub fn load_config_file(path: &Path) -> anyhow::Result<ProjectConfig> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));
    let config = if is_json {
        load_json_config(path)?
    } else {
        load_toml_config(path)?
    };
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config {}", path.display()))?;
    let config: ProjectConfig = toml::from_str(&content)
        .with_context(|| format!("Invalid TOML in {}", path.display()))?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read config {}", path.display()))?;
    let config: ProjectConfig = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", path.display()))?;
    Ok(config)
}

/// Commented example written by `smsguard init`
pub const EXAMPLE_CONFIG: &str = r#"# smsguard configuration

[rules]
# Start from an empty rule table instead of the built-in one
skip_defaults = false

# Built-in patterns to drop (case-insensitive)
# disable = ["gift"]

# Extra indicators. category is one of: bank, link, offer, otp
# [[rules.extra]]
# pattern = "lottery"
# category = "offer"
# weight = 3

[defaults]
# Print per-category stats after the summary (same as --stats)
# stats = true

# Output format: text or json
# format = "text"

# Exit with code 1 when a message reaches this severity (low, medium, high)
# fail_on = "high"
"#;

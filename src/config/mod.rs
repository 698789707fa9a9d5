//! Configuration module for smsguard
//!
//! This module handles:
//! - Project-level configuration (smsguard.toml / .smsguardrc.json)
//! - Rule table adjustments (disable built-ins, add extra rules)
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_config_file,
    load_project_config,
    CliDefaults,
    ProjectConfig,
    RuleConfig,
    RulesConfig,
    CONFIG_FILE_NAME,
    EXAMPLE_CONFIG,
    JSON_CONFIG_FILE_NAME,
};

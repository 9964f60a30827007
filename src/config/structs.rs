//! Configuration struct definitions.

use serde::Deserialize;
use std::collections::HashMap;

/// Top-level configuration. Every field defaults, so an empty file yields a
/// registry with only a bare root category.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Named destinations: `[appender.<name>]` tables.
    pub appender: HashMap<String, AppenderConfig>,
    /// Named categories: `[category.<name>]` tables; dots in the name form
    /// the hierarchy.
    pub category: HashMap<String, CategoryConfig>,
    /// The root category every other category ultimately inherits from.
    pub root: RootConfig,
}

/// One `[appender.<name>]` table: a destination plus the pattern and
/// threshold applied on the way to it.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppenderConfig {
    /// `console`, `stderr`, or `file`.
    pub kind: String,
    /// Destination path; required when `kind = "file"`, also the sharing key.
    pub path: Option<String>,
    /// `append` or `truncate`; only meaningful for file appenders.
    pub mode: String,
    /// Conversion-pattern template.
    pub pattern: String,
    /// Minimum severity; records below it skip this appender.
    pub threshold: String,
}

impl Default for AppenderConfig {
    fn default() -> Self {
        Self {
            kind: "console".to_string(),
            path: None,
            mode: "append".to_string(),
            pattern: "%m".to_string(),
            threshold: "all".to_string(),
        }
    }
}

/// One `[category.<name>]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CategoryConfig {
    /// Appender names, in broadcast order.
    pub appenders: Vec<String>,
    /// When true, ancestor categories' appenders apply too; the chain stops
    /// at the first non-additive ancestor.
    pub additive: bool,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            appenders: Vec::new(),
            additive: true,
        }
    }
}

/// The `[root]` table — the category of last resort.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RootConfig {
    /// Appender names, in broadcast order.
    pub appenders: Vec<String>,
}

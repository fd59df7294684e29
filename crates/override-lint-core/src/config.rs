//! Configuration types for override-lint.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Top-level configuration for override-lint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Per-rule configurations.
    #[serde(default)]
    pub rules: HashMap<String, RuleConfig>,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }

    /// Checks if a rule is enabled, falling back to `default` when the
    /// configuration does not say.
    #[must_use]
    pub fn is_rule_enabled(&self, rule_name: &str, default: bool) -> bool {
        self.rules
            .get(rule_name)
            .and_then(|c| c.enabled)
            .unwrap_or(default)
    }

    /// Gets the severity override for a rule.
    #[must_use]
    pub fn rule_severity(&self, rule_name: &str) -> Option<crate::Severity> {
        self.rules.get(rule_name).and_then(|c| c.severity)
    }

    /// Gets the configuration block for a rule.
    #[must_use]
    pub fn rule(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.rules.get(rule_name)
    }
}

/// Analyzer-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Root directory to analyze (default: current directory).
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Glob patterns to exclude from analysis.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Directory holding bundle catalogs (`meta.json` and `stats/`).
    #[serde(default)]
    pub bundles_dir: Option<PathBuf>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            exclude: vec!["**/node_modules/**".to_string()],
            bundles_dir: None,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

/// Per-rule configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Whether this rule is enabled.
    #[serde(default)]
    pub enabled: Option<bool>,

    /// Severity override for this rule.
    #[serde(default)]
    pub severity: Option<crate::Severity>,

    /// Rule-specific options as key-value pairs.
    #[serde(flatten)]
    pub options: HashMap<String, toml::Value>,
}

impl RuleConfig {
    /// Gets the raw value of an option.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&toml::Value> {
        self.options.get(key)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// IO error reading config file.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },

    /// A rule option holds a value the rule cannot use.
    #[error("Invalid option `{option}` for rule {rule}: {message}")]
    InvalidOption {
        /// Rule name.
        rule: String,
        /// Option name.
        option: String,
        /// What is wrong with it.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.analyzer.bundles_dir.is_none());
        assert!(config.rules.is_empty());
        assert!(!config.is_rule_enabled("no-override", false));
        assert!(config.is_rule_enabled("anything", true));
    }

    #[test]
    fn test_parse_config() {
        let toml = r#"
[analyzer]
root = "./styles"
exclude = ["**/vendor/**"]
bundles_dir = "node_modules/@primer/css/dist"

[rules.no-override]
enabled = true
severity = "warning"
bundles = ["utilities", "buttons"]
ignore_selectors = [".m-0", "/^\\.p-/"]
"#;

        let config = Config::parse(toml).expect("Failed to parse");
        assert_eq!(config.analyzer.root, PathBuf::from("./styles"));
        assert_eq!(
            config.analyzer.bundles_dir,
            Some(PathBuf::from("node_modules/@primer/css/dist"))
        );
        assert!(config.is_rule_enabled("no-override", false));
        assert_eq!(
            config.rule_severity("no-override"),
            Some(crate::Severity::Warning)
        );

        let rule_config = config.rule("no-override").unwrap();
        assert_eq!(
            rule_config.get("bundles"),
            Some(&toml::Value::Array(vec!["utilities".into(), "buttons".into()]))
        );
        assert_eq!(
            rule_config.get("ignore_selectors"),
            Some(&toml::Value::Array(vec![".m-0".into(), "/^\\.p-/".into()]))
        );
    }

    #[test]
    fn test_explicitly_disabled_rule() {
        let config = Config::parse("[rules.no-override]\nenabled = false\n").unwrap();
        assert!(!config.is_rule_enabled("no-override", true));
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            Config::parse("[rules"),
            Err(ConfigError::Parse { .. })
        ));
    }
}

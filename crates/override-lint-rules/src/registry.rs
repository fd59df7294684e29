//! Rule registry: what rules exist and how to build them from configuration.

use override_lint_core::{BundleProvider, Config, ConfigError, RuleBox, RuleConfig};

use crate::no_override::{self, NoOverride};

/// Static description of a built-in rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// Rule code (e.g., "OL001").
    pub code: &'static str,
    /// Kebab-case rule name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Whether the rule runs without `enabled = true`.
    pub enabled_by_default: bool,
}

const RULES: &[RuleInfo] = &[RuleInfo {
    code: no_override::CODE,
    name: no_override::NAME,
    description: "Forbids overriding selectors defined by shared CSS bundles",
    enabled_by_default: false,
}];

/// Returns every built-in rule.
#[must_use]
pub fn available_rules() -> &'static [RuleInfo] {
    RULES
}

/// Looks a rule up by name or code.
#[must_use]
pub fn find_rule(name_or_code: &str) -> Option<&'static RuleInfo> {
    RULES
        .iter()
        .find(|r| r.name == name_or_code || r.code == name_or_code)
}

/// Returns the built-in rules that `config` turns on.
pub fn enabled_rules(config: &Config) -> impl Iterator<Item = &'static RuleInfo> + '_ {
    RULES
        .iter()
        .filter(|r| config.is_rule_enabled(r.name, r.enabled_by_default))
}

/// Builds every built-in rule from `config`.
///
/// Rules are built even when disabled; the analyzer decides whether they run.
///
/// # Errors
///
/// Returns an error if a rule's options are unusable.
pub fn build_rules(
    config: &Config,
    provider: &dyn BundleProvider,
) -> Result<Vec<RuleBox>, ConfigError> {
    let empty = RuleConfig::default();
    let no_override_config = config.rule(no_override::NAME).unwrap_or(&empty);

    Ok(vec![Box::new(NoOverride::from_config(
        no_override_config,
        provider,
    )?)])
}

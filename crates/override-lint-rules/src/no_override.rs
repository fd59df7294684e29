//! Rule to forbid redefining selectors that shared CSS bundles already define.
//!
//! # Rationale
//!
//! Shared bundles (utilities, components) are meant to behave the same
//! everywhere. A stylesheet that redeclares one of their selectors, or
//! styles one of their class names inside its own selectors, silently
//! changes that shared behavior.
//!
//! # Configuration
//!
//! - `enabled`: the rule only runs when set to `true`
//! - `bundles`: ordered list of bundle names to protect (default: `["utilities"]`)
//! - `ignore_selectors`: selectors or class tokens exempt from reporting;
//!   `/.../` entries are regular expressions, others are substrings
//!
//! # Matching
//!
//! For each style rule, first match wins:
//!
//! 1. the whole selector is an indexed selector, is a simple class selector
//!    and is not ignored
//! 2. the first class token (left to right) that is indexed and not ignored

use override_lint_core::{
    BundleProvider, ConfigError, ConfigWarning, Rule, RuleConfig, Severity, StyleRule, Stylesheet,
    Suggestion, Violation,
};

use crate::ignore::IgnorePolicy;
use crate::index::ImmutabilityIndex;
use crate::selector::{class_tokens, is_simple_class_selector};

/// Rule code for no-override.
pub const CODE: &str = "OL001";

/// Rule name for no-override.
pub const NAME: &str = "no-override";

/// Bundle protected when no `bundles` option is given.
pub const DEFAULT_BUNDLE: &str = "utilities";

/// The `bundles` option as configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BundleSelection {
    /// An ordered list of bundle names.
    List(Vec<String>),
    /// The option was set to something other than a list.
    NotAList,
}

impl BundleSelection {
    fn names(&self) -> &[String] {
        match self {
            Self::List(names) => names,
            Self::NotAList => &[],
        }
    }
}

impl Default for BundleSelection {
    fn default() -> Self {
        Self::List(vec![DEFAULT_BUNDLE.to_string()])
    }
}

/// Options for [`NoOverride`].
#[derive(Debug, Clone, Default)]
pub struct NoOverrideOptions {
    /// Bundles whose selectors are immutable.
    pub bundles: BundleSelection,
    /// Exemptions.
    pub ignore: IgnorePolicy,
    /// Custom severity.
    pub severity: Option<Severity>,
}

impl NoOverrideOptions {
    /// Creates options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bundle list.
    #[must_use]
    pub fn bundles<I, S>(mut self, bundles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bundles = BundleSelection::List(bundles.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the ignore policy.
    #[must_use]
    pub fn ignore(mut self, ignore: IgnorePolicy) -> Self {
        self.ignore = ignore;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Reads options from a `[rules.no-override]` table.
    ///
    /// # Errors
    ///
    /// Returns an error if `ignore_selectors` is not a list of strings or
    /// holds an invalid regular expression. A malformed `bundles` value is
    /// not an error; it is reported as a configuration warning.
    pub fn from_config(config: &RuleConfig) -> Result<Self, ConfigError> {
        let bundles = match config.get("bundles") {
            None => BundleSelection::default(),
            Some(toml::Value::Array(values)) => BundleSelection::List(
                values
                    .iter()
                    .map(|v| v.as_str().map_or_else(|| v.to_string(), String::from))
                    .collect(),
            ),
            Some(_) => BundleSelection::NotAList,
        };

        let ignore = match config.get("ignore_selectors") {
            None => IgnorePolicy::none(),
            Some(toml::Value::Array(values)) => {
                let patterns = values
                    .iter()
                    .map(|v| {
                        v.as_str()
                            .ok_or_else(|| invalid_option("ignore_selectors", "entries must be strings"))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                IgnorePolicy::from_patterns(patterns)
                    .map_err(|e| invalid_option("ignore_selectors", e.to_string()))?
            }
            Some(_) => return Err(invalid_option("ignore_selectors", "must be a list")),
        };

        Ok(Self {
            bundles,
            ignore,
            severity: config.severity,
        })
    }
}

fn invalid_option(option: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidOption {
        rule: NAME.to_string(),
        option: option.to_string(),
        message: message.into(),
    }
}

/// A selector found to override an immutable one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Override<'a> {
    /// The exact selector or class token that matched.
    pub matched: &'a str,
    /// Bundle that defines it, when known.
    pub bundle: Option<&'a str>,
}

/// Forbids overriding selectors defined by shared bundles.
#[derive(Debug, Clone)]
pub struct NoOverride {
    index: ImmutabilityIndex,
    ignore: IgnorePolicy,
    severity: Severity,
    warnings: Vec<ConfigWarning>,
}

impl NoOverride {
    /// Builds the rule, indexing the configured bundles from `provider`.
    #[must_use]
    pub fn new(options: NoOverrideOptions, provider: &dyn BundleProvider) -> Self {
        let warnings = bundle_warnings(&options.bundles, provider);
        let index = ImmutabilityIndex::build(options.bundles.names(), provider);
        tracing::debug!(
            "{NAME}: indexed {} selectors, {} class tokens",
            index.selector_count(),
            index.class_count()
        );

        Self {
            index,
            ignore: options.ignore,
            severity: options.severity.unwrap_or(Severity::Error),
            warnings,
        }
    }

    /// Builds the rule from its configuration table.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are unusable; see
    /// [`NoOverrideOptions::from_config`].
    pub fn from_config(
        config: &RuleConfig,
        provider: &dyn BundleProvider,
    ) -> Result<Self, ConfigError> {
        Ok(Self::new(NoOverrideOptions::from_config(config)?, provider))
    }

    /// Returns the index this rule checks against.
    #[must_use]
    pub fn index(&self) -> &ImmutabilityIndex {
        &self.index
    }

    /// Decides whether `selector` overrides an immutable selector or token.
    #[must_use]
    pub fn find_override<'a>(&'a self, selector: &'a str) -> Option<Override<'a>> {
        if let Some(bundle) = self.index.selector_owner(selector) {
            if is_simple_class_selector(selector) && !self.ignore.is_ignored(selector) {
                return Some(Override {
                    matched: selector,
                    bundle: Some(bundle),
                });
            }
        }

        class_tokens(selector).into_iter().find_map(|token| {
            let bundle = self.index.class_owner(token)?;
            (!self.ignore.is_ignored(token)).then_some(Override {
                matched: token,
                bundle: Some(bundle),
            })
        })
    }

    fn check_rule(&self, rule: &StyleRule) -> Option<Violation> {
        let found = self.find_override(&rule.selector)?;
        let message = format_message(&rule.selector, found.matched, found.bundle);
        Some(
            Violation::new(CODE, NAME, self.severity, rule.location.clone(), message)
                .with_suggestion(Suggestion::new(
                    "Add a new class instead of restyling one from a shared bundle",
                )),
        )
    }
}

impl Rule for NoOverride {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids overriding selectors defined by shared CSS bundles"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn enabled_by_default(&self) -> bool {
        false
    }

    fn config_warnings(&self) -> Vec<ConfigWarning> {
        self.warnings.clone()
    }

    fn check(&self, sheet: &Stylesheet) -> Vec<Violation> {
        sheet
            .rules
            .iter()
            .filter_map(|rule| self.check_rule(rule))
            .collect()
    }
}

/// Formats the report for one override.
///
/// `matched` is either the whole `rule_selector` or a class token inside it.
#[must_use]
pub fn format_message(rule_selector: &str, matched: &str, bundle: Option<&str>) -> String {
    let suffix = bundle.map_or_else(String::new, |b| format!(" (found in {b})"));
    if matched == rule_selector {
        format!("\"{rule_selector}\" should not be overridden{suffix}.")
    } else {
        format!("\"{matched}\" should not be overridden in \"{rule_selector}\"{suffix}.")
    }
}

fn bundle_warnings(selection: &BundleSelection, provider: &dyn BundleProvider) -> Vec<ConfigWarning> {
    let got = match selection {
        BundleSelection::NotAList => "(not an array)".to_string(),
        BundleSelection::List(names) => {
            let invalid = names
                .iter()
                .filter(|name| !provider.has_bundle(name))
                .map(String::as_str)
                .collect::<Vec<_>>();
            if invalid.is_empty() {
                return Vec::new();
            }
            format!("\"{}\"", invalid.join("\", \""))
        }
    };

    vec![ConfigWarning::new(
        NAME,
        "bundles",
        format!("The \"bundles\" option must be an array of valid bundles; got: {got}"),
    )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use override_lint_core::{InMemoryBundles, Location};
    use std::path::PathBuf;

    fn catalog() -> InMemoryBundles {
        InMemoryBundles::new()
            .bundle("utilities", [".m-0", ".d-flex", ".text-bold:hover"])
            .bundle("buttons", [".btn", ".btn .octicon"])
    }

    fn rule(options: NoOverrideOptions) -> NoOverride {
        NoOverride::new(options, &catalog())
    }

    fn sheet(selectors: &[&str]) -> Stylesheet {
        Stylesheet::from_rules(
            "app.css",
            selectors
                .iter()
                .enumerate()
                .map(|(i, s)| StyleRule::new(*s, Location::new(PathBuf::from("app.css"), i + 1, 1)))
                .collect(),
        )
    }

    fn check(options: NoOverrideOptions, selectors: &[&str]) -> Vec<Violation> {
        rule(options).check(&sheet(selectors))
    }

    #[test]
    fn whole_selector_match() {
        let violations = check(NoOverrideOptions::new(), &[".m-0"]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].code, CODE);
        assert_eq!(
            violations[0].message,
            "\".m-0\" should not be overridden (found in utilities)."
        );
    }

    #[test]
    fn class_token_match_in_compound_selector() {
        let r = rule(NoOverrideOptions::new());
        let found = r.find_override(".card .m-0").unwrap();
        assert_eq!(found.matched, ".m-0");
        assert_eq!(found.bundle, Some("utilities"));

        let violations = r.check(&sheet(&[".card .m-0"]));
        assert_eq!(
            violations[0].message,
            "\".m-0\" should not be overridden in \".card .m-0\" (found in utilities)."
        );
    }

    #[test]
    fn indexed_pseudo_selector_reports_whole_selector() {
        let r = rule(NoOverrideOptions::new());
        let found = r.find_override(".text-bold:hover").unwrap();
        assert_eq!(found.matched, ".text-bold:hover");
    }

    #[test]
    fn unindexed_pseudo_selector_falls_back_to_token() {
        let r = rule(NoOverrideOptions::new());
        let found = r.find_override(".m-0:focus").unwrap();
        assert_eq!(found.matched, ".m-0");
    }

    #[test]
    fn indexed_complex_selector_uses_token_branch() {
        let r = rule(NoOverrideOptions::new().bundles(["buttons"]));
        // ".btn .octicon" is indexed verbatim but is not a simple class selector
        let found = r.find_override(".btn .octicon").unwrap();
        assert_eq!(found.matched, ".btn");
        assert_eq!(found.bundle, Some("buttons"));
    }

    #[test]
    fn first_unignored_token_wins() {
        let options = NoOverrideOptions::new()
            .bundles(["utilities", "buttons"])
            .ignore(IgnorePolicy::from_patterns([".btn"]).unwrap());
        let r = rule(options);
        let found = r.find_override(".btn.m-0 .d-flex").unwrap();
        assert_eq!(found.matched, ".m-0");
    }

    #[test]
    fn no_match_for_unknown_selectors() {
        let violations = check(NoOverrideOptions::new(), &[".card", "div > a", ".m-01"]);
        assert!(violations.is_empty());
    }

    #[test]
    fn ignored_whole_selector_is_not_reported() {
        let options =
            NoOverrideOptions::new().ignore(IgnorePolicy::from_patterns([".m-0"]).unwrap());
        assert!(check(options, &[".m-0"]).is_empty());
    }

    #[test]
    fn ignored_whole_selector_still_checks_tokens() {
        // The predicate skips the full selector but not the bare token
        let options = NoOverrideOptions::new()
            .ignore(IgnorePolicy::predicate(|s| s == ".text-bold:hover"));
        let r = rule(options);
        let found = r.find_override(".text-bold:hover").unwrap();
        assert_eq!(found.matched, ".text-bold");
    }

    #[test]
    fn predicate_policy_sees_tokens() {
        let options = NoOverrideOptions::new().ignore(IgnorePolicy::predicate(|s| s == ".m-0"));
        assert!(check(options, &[".card .m-0"]).is_empty());
    }

    #[test]
    fn one_violation_per_rule_in_document_order() {
        let violations = check(
            NoOverrideOptions::new(),
            &[".d-flex .m-0", ".card", ".m-0"],
        );
        let lines: Vec<_> = violations.iter().map(|v| v.location.line).collect();
        assert_eq!(lines, vec![1, 3]);
    }

    #[test]
    fn checking_twice_is_identical() {
        let r = rule(NoOverrideOptions::new());
        let s = sheet(&[".m-0", ".x .d-flex", ".y"]);
        let first: Vec<_> = r.check(&s).into_iter().map(|v| v.to_string()).collect();
        let second: Vec<_> = r.check(&s).into_iter().map(|v| v.to_string()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn unknown_bundle_warns_once_and_keeps_valid_ones() {
        let r = rule(NoOverrideOptions::new().bundles(["utilities", "doesNotExist"]));
        let warnings = r.config_warnings();
        assert_eq!(warnings.len(), 1);
        assert_eq!(
            warnings[0].message,
            "The \"bundles\" option must be an array of valid bundles; got: \"doesNotExist\""
        );
        assert_eq!(r.index().selector_owner(".m-0"), Some("utilities"));
    }

    #[test]
    fn lists_every_unknown_bundle() {
        let r = rule(NoOverrideOptions::new().bundles(["a", "utilities", "b"]));
        let warnings = r.config_warnings();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.ends_with("got: \"a\", \"b\""));
    }

    #[test]
    fn valid_bundles_do_not_warn() {
        let r = rule(NoOverrideOptions::new().bundles(["utilities", "buttons"]));
        assert!(r.config_warnings().is_empty());
    }

    #[test]
    fn format_without_bundle() {
        assert_eq!(
            format_message(".m-0", ".m-0", None),
            "\".m-0\" should not be overridden."
        );
        assert_eq!(
            format_message(".a .m-0", ".m-0", None),
            "\".m-0\" should not be overridden in \".a .m-0\"."
        );
    }

    #[test]
    fn options_from_config() {
        let config: RuleConfig = toml::from_str(
            r#"
enabled = true
severity = "warning"
bundles = ["buttons"]
ignore_selectors = [".btn", "/^\\.octi/"]
"#,
        )
        .unwrap();
        let options = NoOverrideOptions::from_config(&config).unwrap();
        assert_eq!(
            options.bundles,
            BundleSelection::List(vec!["buttons".to_string()])
        );
        assert_eq!(options.severity, Some(Severity::Warning));
        assert!(options.ignore.is_ignored(".octicon"));
        assert!(options.ignore.is_ignored(".btn-primary"));
    }

    #[test]
    fn options_default_to_utilities() {
        let options = NoOverrideOptions::from_config(&RuleConfig::default()).unwrap();
        assert_eq!(options.bundles, BundleSelection::default());
        assert!(!options.ignore.is_ignored(".m-0"));
    }

    #[test]
    fn non_list_bundles_warns_and_indexes_nothing() {
        let config: RuleConfig = toml::from_str("bundles = \"utilities\"").unwrap();
        let r = NoOverride::from_config(&config, &catalog()).unwrap();
        assert!(r.index().is_empty());
        assert_eq!(
            r.config_warnings()[0].message,
            "The \"bundles\" option must be an array of valid bundles; got: (not an array)"
        );
    }

    #[test]
    fn invalid_ignore_pattern_is_config_error() {
        let config: RuleConfig = toml::from_str("ignore_selectors = [\"/([/\"]").unwrap();
        let err = NoOverrideOptions::from_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOption { ref option, .. } if option == "ignore_selectors"));
    }

    #[test]
    fn non_list_ignore_is_config_error() {
        let config: RuleConfig = toml::from_str("ignore_selectors = \".m-0\"").unwrap();
        assert!(NoOverrideOptions::from_config(&config).is_err());
    }
}

//! Rule trait for defining stylesheet lint rules.

use crate::stylesheet::Stylesheet;
use crate::types::{ConfigWarning, Severity, Violation};

/// A per-stylesheet lint rule.
///
/// Rules receive a [`Stylesheet`] whose style rules are already in document
/// order, and return violations in that same order.
///
/// # Example
///
/// ```ignore
/// use override_lint_core::{Rule, Stylesheet, Violation};
///
/// pub struct NoIdSelectors;
///
/// impl Rule for NoIdSelectors {
///     fn name(&self) -> &'static str { "no-id-selectors" }
///     fn code(&self) -> &'static str { "OL900" }
///
///     fn check(&self, sheet: &Stylesheet) -> Vec<Violation> {
///         sheet
///             .rules
///             .iter()
///             .filter(|r| r.selector.contains('#'))
///             .map(|r| Violation::new(
///                 self.code(),
///                 self.name(),
///                 self.default_severity(),
///                 r.location.clone(),
///                 "ID selectors are not allowed",
///             ))
///             .collect()
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-override").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "OL001").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Whether the rule runs when the configuration does not mention it.
    fn enabled_by_default(&self) -> bool {
        true
    }

    /// Returns problems found in the rule's options.
    ///
    /// Called once per analysis run, independently of how many stylesheets
    /// are checked.
    fn config_warnings(&self) -> Vec<ConfigWarning> {
        Vec::new()
    }

    /// Checks a single stylesheet and returns any violations found.
    fn check(&self, sheet: &Stylesheet) -> Vec<Violation>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;

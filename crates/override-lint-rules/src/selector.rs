//! Selector string analysis: class-token extraction and simple-class detection.
//!
//! Both checks are plain patterns over the selector text. Neither parses
//! combinators or attribute selectors; the boundaries below are the contract:
//!
//! - a class token is `.` followed by one or more of `[-_a-zA-Z0-9]`
//! - a simple class selector is exactly one class token, optionally followed
//!   by `:` or `::` and a pseudo name made of the same characters

use regex::Regex;
use std::sync::OnceLock;

/// Pattern for one class token.
pub const CLASS_TOKEN_PATTERN: &str = r"\.[-_a-zA-Z0-9]+";

/// Pattern for a whole selector that is a single class with an optional pseudo suffix.
pub const SIMPLE_CLASS_SELECTOR_PATTERN: &str = r"^\.[-_a-zA-Z0-9]+(:{1,2}[-_a-zA-Z0-9]+)?$";

#[allow(clippy::expect_used)]
fn class_token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(CLASS_TOKEN_PATTERN).expect("valid class token pattern"))
}

#[allow(clippy::expect_used)]
fn simple_class_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(SIMPLE_CLASS_SELECTOR_PATTERN).expect("valid simple class selector pattern")
    })
}

/// Returns every class token in `selector`, left to right, without overlaps.
///
/// ```ignore
/// assert_eq!(class_tokens(".card .m-0:hover"), vec![".card", ".m-0"]);
/// assert!(class_tokens("div > a").is_empty());
/// ```
#[must_use]
pub fn class_tokens(selector: &str) -> Vec<&str> {
    class_token_re()
        .find_iter(selector)
        .map(|m| m.as_str())
        .collect()
}

/// Returns true if `selector` is a single class, optionally with one pseudo suffix.
#[must_use]
pub fn is_simple_class_selector(selector: &str) -> bool {
    simple_class_re().is_match(selector)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_tokens_in_order() {
        assert_eq!(class_tokens(".foo.bar"), vec![".foo", ".bar"]);
        assert_eq!(
            class_tokens(".card > .m-0:hover, .p_1"),
            vec![".card", ".m-0", ".p_1"]
        );
    }

    #[test]
    fn no_tokens_without_classes() {
        assert!(class_tokens("div").is_empty());
        assert!(class_tokens("#main > a[href]").is_empty());
        assert!(class_tokens("").is_empty());
    }

    #[test]
    fn token_ignores_lone_dot() {
        assert_eq!(class_tokens(". .a"), vec![".a"]);
    }

    #[test]
    fn token_characters_are_ascii() {
        // Stops at the first character outside [-_a-zA-Z0-9]
        assert_eq!(class_tokens(".btné"), vec![".btn"]);
        assert_eq!(class_tokens(".col-md\\:6"), vec![".col-md"]);
    }

    #[test]
    fn simple_class_selectors() {
        assert!(is_simple_class_selector(".foo"));
        assert!(is_simple_class_selector(".foo:hover"));
        assert!(is_simple_class_selector(".foo::before"));
        assert!(is_simple_class_selector(".m-0"));
    }

    #[test]
    fn compound_and_complex_selectors_are_not_simple() {
        assert!(!is_simple_class_selector(".foo .bar"));
        assert!(!is_simple_class_selector("div.foo"));
        assert!(!is_simple_class_selector(".foo.bar"));
        assert!(!is_simple_class_selector(".foo[disabled]"));
        assert!(!is_simple_class_selector(".foo:::before"));
        assert!(!is_simple_class_selector(".foo:hover:focus"));
        assert!(!is_simple_class_selector(".foo, .bar"));
        assert!(!is_simple_class_selector(".foo:not(.bar)"));
        assert!(!is_simple_class_selector(""));
    }
}

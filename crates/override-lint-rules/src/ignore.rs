//! Ignore policy: which selectors and class tokens are exempt from reporting.

use regex::Regex;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Error building an ignore pattern.
#[derive(Debug, Error)]
#[error("invalid ignore pattern `{pattern}`: {source}")]
pub struct IgnorePatternError {
    /// The pattern as written.
    pub pattern: String,
    /// Regex compile error.
    pub source: regex::Error,
}

/// One configured exclusion.
#[derive(Debug, Clone)]
pub enum IgnorePattern {
    /// Ignores candidates containing this text.
    Literal(String),
    /// Ignores candidates the regex matches anywhere.
    Regex(Regex),
}

impl IgnorePattern {
    /// Parses a configured pattern.
    ///
    /// `/body/` and `/body/i` are regular expressions; anything else is a
    /// literal substring.
    ///
    /// # Errors
    ///
    /// Returns an error if a slash-delimited pattern is not a valid regex.
    pub fn parse(pattern: &str) -> Result<Self, IgnorePatternError> {
        let compile = |body: &str, case_insensitive: bool| {
            let source = if case_insensitive {
                format!("(?i){body}")
            } else {
                body.to_string()
            };
            Regex::new(&source)
                .map(Self::Regex)
                .map_err(|e| IgnorePatternError {
                    pattern: pattern.to_string(),
                    source: e,
                })
        };

        if pattern.len() >= 2 && pattern.starts_with('/') {
            if let Some(body) = pattern[1..].strip_suffix('/') {
                return compile(body, false);
            }
            if let Some(body) = pattern[1..].strip_suffix("/i") {
                return compile(body, true);
            }
        }
        Ok(Self::Literal(pattern.to_string()))
    }

    /// Returns true if this pattern exempts `candidate`.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Literal(text) => candidate.contains(text.as_str()),
            Self::Regex(re) => re.is_match(candidate),
        }
    }
}

impl From<Regex> for IgnorePattern {
    fn from(re: Regex) -> Self {
        Self::Regex(re)
    }
}

/// Caller-supplied ignore predicate.
pub type IgnorePredicate = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Decides whether a full selector or class token is exempt.
///
/// Chosen once when the rule is configured; every check goes through
/// [`IgnorePolicy::is_ignored`].
#[derive(Clone)]
pub enum IgnorePolicy {
    /// Ignored iff at least one pattern matches. Empty ignores nothing.
    Patterns(Vec<IgnorePattern>),
    /// The predicate's answer is final.
    Predicate(IgnorePredicate),
}

impl IgnorePolicy {
    /// A policy that ignores nothing.
    #[must_use]
    pub fn none() -> Self {
        Self::Patterns(Vec::new())
    }

    /// Builds a pattern policy from configured strings.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, IgnorePatternError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        patterns
            .into_iter()
            .map(|p| IgnorePattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Patterns)
    }

    /// Wraps a caller-supplied predicate.
    #[must_use]
    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(f))
    }

    /// Returns true if `candidate` must not be reported.
    #[must_use]
    pub fn is_ignored(&self, candidate: &str) -> bool {
        match self {
            Self::Patterns(patterns) => patterns.iter().any(|p| p.matches(candidate)),
            Self::Predicate(f) => f(candidate),
        }
    }
}

impl Default for IgnorePolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for IgnorePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patterns(patterns) => f.debug_tuple("Patterns").field(patterns).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_policy_ignores_nothing() {
        let policy = IgnorePolicy::default();
        assert!(!policy.is_ignored(".m-0"));
        assert!(!policy.is_ignored(""));
    }

    #[test]
    fn literal_is_substring_match() {
        let policy = IgnorePolicy::from_patterns([".m-0"]).unwrap();
        assert!(policy.is_ignored(".m-0"));
        assert!(policy.is_ignored(".m-0:hover"));
        assert!(policy.is_ignored(".card .m-0"));
        assert!(!policy.is_ignored(".m-1"));
    }

    #[test]
    fn slash_delimited_is_regex() {
        let policy = IgnorePolicy::from_patterns([r"/^\.p-[0-9]$/"]).unwrap();
        assert!(policy.is_ignored(".p-1"));
        assert!(!policy.is_ignored(".p-12"));
        assert!(!policy.is_ignored(".card .p-1"));
    }

    #[test]
    fn regex_case_insensitive_flag() {
        let pattern = IgnorePattern::parse("/^\\.BTN/i").unwrap();
        assert!(matches!(pattern, IgnorePattern::Regex(_)));
        assert!(pattern.matches(".btn-primary"));
    }

    #[test]
    fn lone_slash_is_literal() {
        let pattern = IgnorePattern::parse("/").unwrap();
        assert!(matches!(pattern, IgnorePattern::Literal(_)));
        assert!(pattern.matches("a/b"));
    }

    #[test]
    fn any_pattern_suffices() {
        let policy = IgnorePolicy::from_patterns([".x", "/^\\.m-/"]).unwrap();
        assert!(policy.is_ignored(".m-3"));
        assert!(policy.is_ignored(".x-1"));
        assert!(!policy.is_ignored(".p-3"));
    }

    #[test]
    fn invalid_regex_is_error() {
        let err = IgnorePolicy::from_patterns(["/([/"]).unwrap_err();
        assert_eq!(err.pattern, "/([/");
    }

    #[test]
    fn predicate_is_authoritative() {
        let policy = IgnorePolicy::predicate(|s| s.starts_with(".js-"));
        assert!(policy.is_ignored(".js-toggle"));
        assert!(!policy.is_ignored(".m-0"));
        assert_eq!(format!("{policy:?}"), "Predicate(..)");
    }

    #[test]
    fn regex_pattern_from_compiled() {
        let policy = IgnorePolicy::Patterns(vec![Regex::new("^\\.d-").unwrap().into()]);
        assert!(policy.is_ignored(".d-flex"));
    }
}

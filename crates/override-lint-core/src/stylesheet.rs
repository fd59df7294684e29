//! Stylesheet input: an ordered sequence of style rules.
//!
//! Rules only need two things from a stylesheet: each rule's selector text
//! and where the rule sits in the source. [`Stylesheet::parse`] extracts both
//! with `lightningcss`; hosts that already walk their own tree can hand the
//! rules over with [`Stylesheet::from_rules`].

use crate::types::Location;

use lightningcss::rules::{style::StyleRule as CssStyleRule, CssRule, CssRuleList};
use lightningcss::stylesheet::{ParserOptions, StyleSheet};
use lightningcss::traits::ToCss;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Errors produced while reading a stylesheet.
#[derive(Debug, Error)]
pub enum StylesheetError {
    /// The CSS could not be parsed.
    #[error("Parse error in {path}: {message}")]
    Parse {
        /// Path of the stylesheet that failed to parse.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// One style rule as authored: its full selector and its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Selector text exactly as written, comments and surrounding
    /// whitespace removed.
    pub selector: String,
    /// Where the rule starts.
    pub location: Location,
}

impl StyleRule {
    /// Creates a rule from a selector and location.
    #[must_use]
    pub fn new(selector: impl Into<String>, location: Location) -> Self {
        Self {
            selector: selector.into(),
            location,
        }
    }
}

/// A stylesheet reduced to its style rules, in document order.
#[derive(Debug, Clone)]
pub struct Stylesheet {
    /// Path relative to the analysis root.
    pub path: PathBuf,
    /// Style rules in the order they appear, nested rules after their parent.
    pub rules: Vec<StyleRule>,
}

impl Stylesheet {
    /// Builds a stylesheet from rules that were already walked by the host.
    #[must_use]
    pub fn from_rules(path: impl Into<PathBuf>, rules: Vec<StyleRule>) -> Self {
        Self {
            path: path.into(),
            rules,
        }
    }

    /// Parses CSS source and collects every style rule.
    ///
    /// Style rules nested in `@media`, `@supports`, `@layer` blocks and
    /// nested style rules are visited depth-first, so the output follows
    /// document order. Invalid rules and declarations are dropped with a
    /// warning; the rest of the sheet is still returned.
    ///
    /// # Errors
    ///
    /// Returns [`StylesheetError::Parse`] if the CSS cannot be parsed at all.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self, StylesheetError> {
        Self::parse_with(path.into(), content, true)
    }

    /// Parses CSS source, failing on the first invalid rule or declaration.
    ///
    /// # Errors
    ///
    /// Returns [`StylesheetError::Parse`] if anything in the CSS is malformed.
    pub fn parse_strict(
        path: impl Into<PathBuf>,
        content: &str,
    ) -> Result<Self, StylesheetError> {
        Self::parse_with(path.into(), content, false)
    }

    fn parse_with(
        path: PathBuf,
        content: &str,
        error_recovery: bool,
    ) -> Result<Self, StylesheetError> {
        let warnings = Arc::new(RwLock::new(Vec::new()));
        let options = ParserOptions {
            error_recovery,
            warnings: Some(Arc::clone(&warnings)),
            ..ParserOptions::default()
        };
        let sheet =
            StyleSheet::parse(content, options).map_err(|e| StylesheetError::Parse {
                path: path.clone(),
                message: e.to_string(),
            })?;

        if let Ok(recovered) = warnings.read() {
            for warning in recovered.iter() {
                tracing::warn!("Skipped invalid CSS in {}: {}", path.display(), warning);
            }
        }

        let mut walker = RuleWalker {
            path: &path,
            content,
            rules: Vec::new(),
        };
        walker.walk(&sheet.rules);

        Ok(Self {
            rules: walker.rules,
            path,
        })
    }

    /// Returns the number of style rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if the stylesheet has no style rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

struct RuleWalker<'a> {
    path: &'a Path,
    content: &'a str,
    rules: Vec<StyleRule>,
}

impl RuleWalker<'_> {
    fn walk(&mut self, list: &CssRuleList<'_>) {
        for rule in &list.0 {
            match rule {
                CssRule::Style(style) => self.visit_style(style),
                CssRule::Media(media) => self.walk(&media.rules),
                CssRule::Supports(supports) => self.walk(&supports.rules),
                CssRule::LayerBlock(layer) => self.walk(&layer.rules),
                _ => {}
            }
        }
    }

    fn visit_style(&mut self, style: &CssStyleRule<'_>) {
        // lightningcss lines are 0-indexed, columns 1-indexed
        let line = style.loc.line as usize + 1;
        let column = style.loc.column as usize;
        let offset = offset_for(self.content, line, column);

        let (selector, length) = match self.content.get(offset..).and_then(authored_prelude) {
            Some(prelude) => prelude,
            None => {
                let serialized = style
                    .selectors
                    .to_css_string(Default::default())
                    .unwrap_or_default();
                let length = serialized.len().min(self.content.len() - offset);
                (serialized, length)
            }
        };

        self.rules.push(StyleRule::new(
            selector,
            Location::new(self.path.to_path_buf(), line, column).with_span(offset, length),
        ));

        self.walk(&style.rules);
    }
}

/// Reads a rule prelude up to its opening `{`.
///
/// Returns the selector with comments stripped and outer whitespace trimmed,
/// plus the byte length of the raw prelude without trailing whitespace.
/// Quoted strings, escapes and bracketed groups never end the prelude.
fn authored_prelude(source: &str) -> Option<(String, usize)> {
    let mut selector = String::new();
    let mut quote = None;
    let mut depth = 0usize;
    let mut chars = source.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            selector.push(c);
            if let Some((_, escaped)) = chars.next() {
                selector.push(escaped);
            }
            continue;
        }
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            selector.push(c);
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' => depth += 1,
            ')' | ']' => depth = depth.saturating_sub(1),
            '{' if depth == 0 => {
                let length = source[..i].trim_end().len();
                return Some((selector.trim().to_string(), length));
            }
            '/' if chars.peek().is_some_and(|&(_, next)| next == '*') => {
                chars.next();
                let mut prev = '\0';
                for (_, inner) in chars.by_ref() {
                    if prev == '*' && inner == '/' {
                        break;
                    }
                    prev = inner;
                }
                continue;
            }
            _ => {}
        }
        selector.push(c);
    }

    None
}

/// Calculates byte offset for a given line and column.
///
/// # Arguments
///
/// * `line` - 1-indexed line number
/// * `column` - 1-indexed column number, counted in UTF-16 code units
///
/// # Returns
///
/// Byte offset from the start of the content, or the content length if out of bounds.
#[must_use]
pub fn offset_for(content: &str, line: usize, column: usize) -> usize {
    if line == 0 {
        return 0;
    }

    let mut offset = 0;
    for (i, line_content) in content.split('\n').enumerate() {
        if i + 1 == line {
            return offset + column_offset(line_content, column);
        }
        offset += line_content.len() + 1;
    }

    content.len()
}

/// Byte position of a UTF-16 column within one line, clamped to the line end.
fn column_offset(line: &str, column: usize) -> usize {
    let target = column.saturating_sub(1);
    let mut units = 0;
    for (i, c) in line.char_indices() {
        if units >= target {
            return i;
        }
        units += c.len_utf16();
    }
    line.len()
}

//! # override-lint-core
//!
//! Core framework for linting stylesheets against shared CSS bundles.
//!
//! This crate provides the foundational traits and types for building
//! stylesheet rules. It includes:
//!
//! - [`Rule`] trait for per-stylesheet rules
//! - [`Stylesheet`] and [`StyleRule`], the rule input
//! - [`BundleProvider`] for reading bundle catalogs
//! - [`Analyzer`] for orchestrating lint execution
//! - [`Violation`] and [`ConfigWarning`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use override_lint_core::Analyzer;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./styles")
//!     .rule(MyRule::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! for violation in &result.violations {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
pub mod bundles;
mod config;
mod rule;
pub mod stylesheet;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use bundles::{BundleError, BundleProvider, DistBundles, InMemoryBundles};
pub use config::{AnalyzerConfig, Config, ConfigError, RuleConfig};
pub use rule::{Rule, RuleBox};
pub use stylesheet::{StyleRule, Stylesheet, StylesheetError};
pub use types::{
    ConfigWarning, LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic,
};

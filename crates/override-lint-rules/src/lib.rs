//! # override-lint-rules
//!
//! Built-in stylesheet rules for override-lint.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | OL001 | `no-override` | Forbids overriding selectors defined by shared CSS bundles |
//!
//! ## Usage
//!
//! ```ignore
//! use override_lint_core::{Analyzer, DistBundles};
//! use override_lint_rules::{NoOverride, NoOverrideOptions};
//!
//! let bundles = DistBundles::open("node_modules/@primer/css/dist")?;
//! let analyzer = Analyzer::builder()
//!     .root("./styles")
//!     .rule(NoOverride::new(NoOverrideOptions::new().bundles(["utilities"]), &bundles))
//!     .build()?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ignore;
pub mod index;
mod no_override;
mod registry;
pub mod selector;

pub use ignore::{IgnorePattern, IgnorePolicy};
pub use index::ImmutabilityIndex;
pub use no_override::{
    format_message, BundleSelection, NoOverride, NoOverrideOptions, Override, DEFAULT_BUNDLE,
};
pub use registry::{available_rules, build_rules, enabled_rules, find_rule, RuleInfo};

/// Re-export core types for convenience.
pub use override_lint_core::{Rule, Severity, Violation};

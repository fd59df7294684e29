//! Index of selectors and class tokens owned by configured bundles.

use override_lint_core::BundleProvider;
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::selector::class_tokens;

/// Maps immutable selectors and class tokens to the bundle defining them.
///
/// Built once from an ordered bundle list; read-only afterwards. When two
/// bundles define the same selector or token, the later bundle in the list
/// owns it.
#[derive(Debug, Clone, Default)]
pub struct ImmutabilityIndex {
    selector_owner: HashMap<String, String>,
    class_owner: HashMap<String, String>,
}

impl ImmutabilityIndex {
    /// Builds the index from `bundles`, in order.
    ///
    /// Names missing from the provider's available set contribute nothing.
    /// A bundle whose selectors cannot be read is logged and skipped.
    #[must_use]
    pub fn build<S: AsRef<str>>(bundles: &[S], provider: &dyn BundleProvider) -> Self {
        let available = provider.available_bundles();
        let mut index = Self::default();

        for bundle in bundles.iter().map(AsRef::as_ref) {
            if !available.iter().any(|b| b == bundle) {
                continue;
            }
            let selectors = match provider.bundle_selectors(bundle) {
                Ok(selectors) => selectors,
                Err(e) => {
                    warn!("Skipping bundle {bundle}: {e}");
                    continue;
                }
            };
            debug!("Indexing {} selectors from {bundle}", selectors.len());

            for selector in selectors {
                for token in class_tokens(&selector) {
                    index
                        .class_owner
                        .insert(token.to_string(), bundle.to_string());
                }
                index.selector_owner.insert(selector, bundle.to_string());
            }
        }

        index
    }

    /// Returns the bundle owning this exact selector.
    #[must_use]
    pub fn selector_owner(&self, selector: &str) -> Option<&str> {
        self.selector_owner.get(selector).map(String::as_str)
    }

    /// Returns the bundle owning this class token.
    #[must_use]
    pub fn class_owner(&self, token: &str) -> Option<&str> {
        self.class_owner.get(token).map(String::as_str)
    }

    /// Number of indexed selectors.
    #[must_use]
    pub fn selector_count(&self) -> usize {
        self.selector_owner.len()
    }

    /// Number of indexed class tokens.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.class_owner.len()
    }

    /// Returns true if nothing was indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selector_owner.is_empty()
    }
}

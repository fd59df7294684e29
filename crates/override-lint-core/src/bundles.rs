//! Bundle catalogs: which shared CSS bundles exist and which selectors they define.
//!
//! Rules never read bundle data themselves. They receive a [`BundleProvider`],
//! which keeps them deterministic and lets tests use [`InMemoryBundles`].
//! [`DistBundles`] reads the layout published by a CSS framework build:
//!
//! ```text
//! <dist>/meta.json              {"bundles": {"utilities": {...}, ...}}
//! <dist>/stats/<bundle>.json    {"selectors": {"values": [".m-0", ...]}}
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from reading bundle data.
#[derive(Debug, Error)]
pub enum BundleError {
    /// IO error reading a bundle file.
    #[error("Failed to read bundle data {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// A bundle file is not valid JSON of the expected shape.
    #[error("Invalid bundle data in {path}: {source}")]
    Json {
        /// Path of the malformed file.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The requested bundle is not in the catalog.
    #[error("Unknown bundle: {0}")]
    UnknownBundle(String),
}

/// Read-only access to bundle catalogs.
pub trait BundleProvider: Send + Sync {
    /// Returns the names of all bundles that exist.
    fn available_bundles(&self) -> Vec<String>;

    /// Returns the selectors defined by `bundle`, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundle is unknown or its data cannot be read.
    fn bundle_selectors(&self, bundle: &str) -> Result<Vec<String>, BundleError>;

    /// Returns true if `bundle` exists.
    fn has_bundle(&self, bundle: &str) -> bool {
        self.available_bundles().iter().any(|b| b == bundle)
    }
}

/// Bundle catalogs held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBundles {
    bundles: BTreeMap<String, Vec<String>>,
}

impl InMemoryBundles {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a bundle with its selectors, replacing any previous entry.
    #[must_use]
    pub fn bundle<I, S>(mut self, name: impl Into<String>, selectors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bundles
            .insert(name.into(), selectors.into_iter().map(Into::into).collect());
        self
    }
}

impl BundleProvider for InMemoryBundles {
    fn available_bundles(&self) -> Vec<String> {
        self.bundles.keys().cloned().collect()
    }

    fn bundle_selectors(&self, bundle: &str) -> Result<Vec<String>, BundleError> {
        self.bundles
            .get(bundle)
            .cloned()
            .ok_or_else(|| BundleError::UnknownBundle(bundle.to_string()))
    }

    fn has_bundle(&self, bundle: &str) -> bool {
        self.bundles.contains_key(bundle)
    }
}

#[derive(Debug, Deserialize)]
struct MetaFile {
    #[serde(default)]
    bundles: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct StatsFile {
    selectors: SelectorStats,
}

#[derive(Debug, Deserialize)]
struct SelectorStats {
    #[serde(default)]
    values: Vec<String>,
}

/// Bundle catalogs read from a framework `dist/` directory.
///
/// `meta.json` is read once at construction; per-bundle stats are read on
/// demand.
#[derive(Debug, Clone)]
pub struct DistBundles {
    dir: PathBuf,
    available: Vec<String>,
}

impl DistBundles {
    /// Opens a dist directory and reads its bundle manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if `meta.json` is missing or malformed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, BundleError> {
        let dir = dir.into();
        let meta: MetaFile = read_json(&dir.join("meta.json"))?;
        let available = meta.bundles.into_keys().collect::<Vec<_>>();
        tracing::debug!(
            "Loaded bundle manifest from {} ({} bundles)",
            dir.display(),
            available.len()
        );
        Ok(Self { dir, available })
    }
}

impl BundleProvider for DistBundles {
    fn available_bundles(&self) -> Vec<String> {
        self.available.clone()
    }

    fn bundle_selectors(&self, bundle: &str) -> Result<Vec<String>, BundleError> {
        if !self.has_bundle(bundle) {
            return Err(BundleError::UnknownBundle(bundle.to_string()));
        }
        let path = self.dir.join("stats").join(format!("{bundle}.json"));
        let stats: StatsFile = read_json(&path)?;
        Ok(stats.selectors.values)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, BundleError> {
    let content = std::fs::read_to_string(path).map_err(|e| BundleError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| BundleError::Json {
        path: path.to_path_buf(),
        source: e,
    })
}

//! Check command implementation.

use anyhow::{Context, Result};
use override_lint_core::{Analyzer, BundleProvider, Config, DistBundles, InMemoryBundles};
use override_lint_rules::{build_rules, enabled_rules};
use std::path::{Path, PathBuf};

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Bundle catalog location used when neither the flag nor the config sets one.
const DEFAULT_BUNDLES_DIR: &str = "node_modules/@primer/css/dist";

/// Runs the check command.
pub fn run(
    path: &Path,
    format: OutputFormat,
    exclude: Vec<String>,
    bundles_dir: Option<PathBuf>,
    source: &ConfigSource,
) -> Result<()> {
    let config = match source {
        ConfigSource::Default => Config::default(),
        other => {
            // Invariant: non-Default variants always have a path
            let p = other.path().context("resolved config has no path")?;
            if source.is_global() {
                tracing::info!("Using global config: {}", p.display());
            }
            Config::from_file(p)
                .with_context(|| format!("Failed to load config: {}", p.display()))?
        }
    };

    let provider: Box<dyn BundleProvider> = if enabled_rules(&config).next().is_some() {
        let bundles_dir = resolve_bundles_dir(path, bundles_dir, &config);
        Box::new(DistBundles::open(&bundles_dir).with_context(|| {
            format!(
                "Failed to open bundle catalog at {} (set --bundles-dir or analyzer.bundles_dir)",
                bundles_dir.display()
            )
        })?)
    } else {
        tracing::debug!("No enabled rule reads bundles; skipping the catalog");
        Box::new(InMemoryBundles::new())
    };

    let mut builder = Analyzer::builder().root(path).config(config.clone());

    for pattern in exclude {
        builder = builder.exclude(pattern);
    }

    for rule in build_rules(&config, provider.as_ref()).context("Invalid rule configuration")? {
        if !config.is_rule_enabled(rule.name(), rule.enabled_by_default()) {
            tracing::warn!(
                "Rule {} is disabled; set `enabled = true` under [rules.{}]",
                rule.name(),
                rule.name()
            );
        }
        builder = builder.rule_box(rule);
    }

    let analyzer = builder.build().context("Failed to build analyzer")?;

    tracing::info!("Analyzing {:?} with {} rules", path, analyzer.rule_count());

    let result = analyzer.analyze().context("Analysis failed")?;

    super::output::print(&result, format, analyzer.root())?;

    // Exit with error code if there are errors
    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Picks the bundle catalog directory: flag, then config, then the default.
///
/// Relative paths are resolved against the analyzed path.
fn resolve_bundles_dir(path: &Path, flag: Option<PathBuf>, config: &Config) -> PathBuf {
    let dir = flag
        .or_else(|| config.analyzer.bundles_dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLES_DIR));
    if dir.is_absolute() {
        dir
    } else {
        path.join(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn runs_without_catalog_when_rules_are_disabled() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("app.css"), ".m-0 { margin: 1px; }").unwrap();

        run(
            tmp.path(),
            OutputFormat::Compact,
            Vec::new(),
            None,
            &ConfigSource::Default,
        )
        .unwrap();
    }

    #[test]
    fn missing_catalog_is_an_error_once_enabled() {
        let tmp = TempDir::new().unwrap();
        let config = tmp.path().join("override-lint.toml");
        fs::write(&config, "[rules.no-override]\nenabled = true\n").unwrap();

        let err = run(
            tmp.path(),
            OutputFormat::Compact,
            Vec::new(),
            None,
            &ConfigSource::Explicit(config),
        )
        .unwrap_err();
        assert!(err.to_string().contains("Failed to open bundle catalog"));
    }

    #[test]
    fn flag_beats_config() {
        let config =
            Config::parse("[analyzer]\nbundles_dir = \"vendor/dist\"\n").unwrap();
        let dir = resolve_bundles_dir(
            Path::new("/project"),
            Some(PathBuf::from("/opt/dist")),
            &config,
        );
        assert_eq!(dir, PathBuf::from("/opt/dist"));
    }

    #[test]
    fn config_is_relative_to_path() {
        let config =
            Config::parse("[analyzer]\nbundles_dir = \"vendor/dist\"\n").unwrap();
        let dir = resolve_bundles_dir(Path::new("/project"), None, &config);
        assert_eq!(dir, PathBuf::from("/project/vendor/dist"));
    }

    #[test]
    fn falls_back_to_default() {
        let dir = resolve_bundles_dir(Path::new("/project"), None, &Config::default());
        assert_eq!(dir, Path::new("/project").join(DEFAULT_BUNDLES_DIR));
    }
}

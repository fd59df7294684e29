//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# override-lint configuration

[analyzer]
# Root directory to analyze (default: current directory)
# root = "./src"

# Glob patterns to exclude from analysis
exclude = [
    "**/node_modules/**",
    "**/dist/**",
]

# Directory holding bundle catalogs (meta.json and stats/<bundle>.json)
bundles_dir = "node_modules/@primer/css/dist"

[rules.no-override]
enabled = true
# severity = "warning"  # Override default severity

# Bundles whose selectors must not be overridden; later bundles win
# when two define the same selector
bundles = ["utilities"]

# Selectors or class tokens to skip. "/.../" entries are regular
# expressions, anything else matches as a substring.
ignore_selectors = []
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("override-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created override-lint.toml");
    println!("\nNext steps:");
    println!("  1. Point analyzer.bundles_dir at your bundle catalog");
    println!("  2. Run: override-lint check");

    Ok(())
}

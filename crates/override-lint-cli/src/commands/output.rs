//! Shared output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use override_lint_core::{LintResult, Severity, ViolationDiagnostic};
use std::path::Path;

use crate::OutputFormat;

/// Print lint results in the specified format.
///
/// `root` is the analysis root; violation paths are relative to it.
pub fn print(result: &LintResult, format: OutputFormat, root: &Path) -> Result<()> {
    match format {
        OutputFormat::Text => print_text(result),
        OutputFormat::Rich => print_rich(result, root),
        OutputFormat::Json => return print_json(result),
        OutputFormat::Compact => print_compact(result),
    }
    Ok(())
}

fn print_warnings(result: &LintResult) {
    for warning in &result.warnings {
        println!("\x1b[33mconfig warning\x1b[0m {warning}");
    }
    if !result.warnings.is_empty() {
        println!();
    }
}

fn print_text(result: &LintResult) {
    let (errors, warnings, infos) = result.count_by_severity();

    print_warnings(result);

    for violation in &result.violations {
        let severity_indicator = match violation.severity {
            Severity::Error => "\x1b[31merror\x1b[0m",
            Severity::Warning => "\x1b[33mwarning\x1b[0m",
            Severity::Info => "\x1b[34minfo\x1b[0m",
        };
        let plain = format!("  {}:", violation.severity);
        let colored = format!("  {severity_indicator}:");
        println!("{}", violation.format().replacen(&plain, &colored, 1));
    }

    let summary_color = if errors > 0 {
        "\x1b[31m"
    } else if warnings > 0 {
        "\x1b[33m"
    } else {
        "\x1b[32m"
    };

    println!(
        "{}Found {} error(s), {} warning(s), {} info(s) in {} file(s)\x1b[0m",
        summary_color, errors, warnings, infos, result.files_checked
    );
}

fn print_rich(result: &LintResult, root: &Path) {
    print_warnings(result);

    for violation in &result.violations {
        let diagnostic = ViolationDiagnostic::from(violation);
        let file = &violation.location.file;
        let report = match std::fs::read_to_string(root.join(file)) {
            Ok(source) => Report::new(diagnostic)
                .with_source_code(NamedSource::new(file.display().to_string(), source)),
            Err(e) => {
                tracing::debug!("No source for {}: {e}", file.display());
                Report::new(diagnostic)
            }
        };
        println!("{report:?}");
    }

    let (errors, warnings, infos) = result.count_by_severity();
    println!(
        "Found {} error(s), {} warning(s), {} info(s) in {} file(s)",
        errors, warnings, infos, result.files_checked
    );
}

fn print_json(result: &LintResult) -> Result<()> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}

fn print_compact(result: &LintResult) {
    for warning in &result.warnings {
        println!("config: {warning}");
    }
    for violation in &result.violations {
        println!("{violation}");
    }
}

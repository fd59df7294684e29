//! List rules command implementation.

use override_lint_rules::available_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<20} {:<10} Description", "Code", "Name", "Default");
    println!("{}", "-".repeat(80));

    for rule in available_rules() {
        println!(
            "{:<10} {:<20} {:<10} {}",
            rule.code,
            rule.name,
            if rule.enabled_by_default { "on" } else { "off" },
            rule.description
        );
    }

    println!("\nEnable a rule in override-lint.toml, e.g.:");
    println!("  [rules.no-override]");
    println!("  enabled = true");
}

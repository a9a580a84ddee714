//! Terminal output helpers

use std::path::Path;

use console::style;

use mkchangelog_changelog::formatter::DATE_FORMAT;
use mkchangelog_core::VersionRecord;

/// Print a success line
pub fn success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an error line to stderr
pub fn error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), message);
}

/// Print a warning line
pub fn warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}

/// `  label: value` with a dimmed label
pub fn key_value(key: &str, value: &str) -> String {
    format!("  {}: {}", style(key).dim(), value)
}

/// Version name and release date, the name highlighted
pub fn version_line(label: &str, version: &VersionRecord) -> String {
    key_value(
        label,
        &format!(
            "{} ({})",
            style(&version.name).green().bold(),
            version.date.format(DATE_FORMAT)
        ),
    )
}

/// Report a file written to disk
pub fn written(what: &str, path: &Path) {
    success(&format!("{} written to {}", what, style(path.display()).cyan()));
}

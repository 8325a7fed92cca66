//! Console styling: status lines and health color map.

use colored::Colorize;
use comfy_table::Color;

/// Prints a success line to stderr.
pub fn success(message: &str) {
    eprintln!("{} {message}", "✓".green());
}

/// Prints an informational line to stderr.
pub fn info(message: &str) {
    eprintln!("{} {message}", "!".blue());
}

/// Prints a warning line to stderr.
pub fn warning(message: &str) {
    eprintln!("{} {message}", "⚠".yellow());
}

/// Returns the table cell color for a component health status.
#[must_use]
pub fn health_color(status: Option<&str>) -> Color {
    if status == Some("healthy") {
        Color::Green
    } else {
        Color::Red
    }
}

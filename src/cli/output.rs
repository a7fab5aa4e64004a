//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream};

const RULE_WIDTH: usize = 56;

/// Print the tool name and version.
pub fn header(version: &str) {
    println!(
        "{} {version}",
        "orlab".if_supports_color(Stream::Stdout, |t| t.bold())
    );
}

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<28} {value}");
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("✓ {message}");
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("⚠ {message}");
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("✗ {message}");
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

/// Format an emphasized value.
pub fn highlight(value: impl Display) -> String {
    format!(
        "{}",
        value
            .to_string()
            .if_supports_color(Stream::Stdout, |t| t.cyan())
    )
}

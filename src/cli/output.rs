//! Shared CLI output helpers for consistent operator-facing text.

use std::fmt::Display;
use std::io::{self, Write};

use owo_colors::OwoColorize;

const RULE_WIDTH: usize = 56;

/// Print the console header with version.
pub fn header() {
    println!();
    println!("helmsman v{}", env!("CARGO_PKG_VERSION"));
    println!("{}", "━".repeat(RULE_WIDTH));
}

/// Print a section header and separator.
pub fn section(title: &str) {
    println!();
    println!("{title}");
    println!("{}", "─".repeat(RULE_WIDTH));
}

/// Print a simple key/value line.
pub fn key_value(label: &str, value: impl Display) {
    println!("{label:<13} {value}");
}

/// Print a successful status line.
pub fn ok(message: &str) {
    println!("{} {message}", "✓".green());
}

/// Print a warning status line.
pub fn warn(message: &str) {
    println!("{} {message}", "⚠".yellow());
}

/// Print an error status line.
pub fn error(message: &str) {
    eprintln!("{} {message}", "✗".red());
}

/// Print a single-line note.
pub fn note(message: &str) {
    println!("{message}");
}

/// Start a progress line in the format `Label... `.
pub fn progress(label: &str) {
    print!("{label}... ");
    let _ = io::stdout().flush();
}

/// Finish a progress line.
pub fn progress_done(success: bool) {
    println!("{}", if success { "ok" } else { "failed" });
}

/// Ask a `[y/N]` confirmation on stdin. Anything but `y` declines.
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}

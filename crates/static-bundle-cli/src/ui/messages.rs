//! Status message functions for terminal output.

use owo_colors::OwoColorize;

use super::paint;

/// Print a success message to stderr.
pub fn success(message: &str) {
    eprintln!("{} {}", paint("✓", |t| t.green().bold().to_string()), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", paint("ℹ", |t| t.blue().bold().to_string()), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        paint("⚠", |t| t.yellow().bold().to_string()),
        paint(message, |t| t.yellow().to_string())
    );
}

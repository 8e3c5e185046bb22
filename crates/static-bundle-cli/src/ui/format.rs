//! Formatting utilities for sizes, durations, and build summaries.

use std::time::Duration;

use console::Term;
use owo_colors::OwoColorize;
use static_bundle::{BuildReport, OutputKind};

use super::paint;

/// Format file size in human-readable format.
///
/// ```
/// use static_bundle_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Format duration in human-readable format (ms, s, m s).
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

fn kind_label(kind: OutputKind) -> &'static str {
    match kind {
        OutputKind::Chunk => "js",
        OutputKind::Asset => "asset",
        OutputKind::Sourcemap => "map",
        OutputKind::Copied => "copy",
    }
}

/// Print the written files and totals to stderr.
pub fn print_build_summary(report: &BuildReport, elapsed: Duration) {
    let width = (Term::stderr().size().1 as usize).min(80);

    eprintln!(
        "\n{}",
        paint("Build Summary", |t| t.bold().underline().to_string())
    );
    eprintln!("{}", "─".repeat(width));

    for file in &report.files {
        eprintln!(
            "  {} {:<5} {} {}",
            paint("▸", |t| t.blue().to_string()),
            kind_label(file.kind),
            paint(&file.filename, |t| t.bright_white().bold().to_string()),
            paint(&format_size(file.size), |t| t.dimmed().to_string()),
        );
    }

    eprintln!("{}", "─".repeat(width));
    eprintln!(
        "  {} {} files, {} in {}",
        paint("Total:", |t| t.bold().to_string()),
        report.files.len(),
        paint(&format_size(report.total_size()), |t| t.green().to_string()),
        paint(&format_duration(elapsed), |t| t.green().to_string()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(format_size(1), "1 B");
        assert_eq!(format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1_048_576), "1.00 MB");
        assert_eq!(format_size(2_147_483_648), "2.00 GB");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(0)), "0ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
    }

    #[test]
    fn test_summary_does_not_panic_on_empty_report() {
        print_build_summary(&BuildReport::default(), Duration::from_millis(12));
    }
}

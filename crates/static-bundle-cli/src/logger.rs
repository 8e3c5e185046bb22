//! Logging setup for the CLI.
//!
//! The library emits `tracing` events; this module installs the subscriber
//! that prints them. The filter comes from the configured [`LogLevel`], which
//! already reflects `--verbose` and `--quiet`. `RUST_LOG` takes over when it
//! is set and neither flag was given.

use static_bundle::LogLevel;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ui;

/// Crates whose events are shown.
const TARGETS: &[&str] = &["static_bundle", "static_bundle_cli"];

/// Filter directive for `level` across this workspace's crates.
pub fn filter_directive(level: LogLevel) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level.as_filter()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Build the filter for `level`, deferring to `RUST_LOG` when allowed.
pub fn build_filter(level: LogLevel, allow_env_override: bool) -> EnvFilter {
    if allow_env_override {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(filter_directive(level))
}

/// Install the global subscriber.
///
/// Call once, after configuration is loaded and [`ui::init_colors`] has run.
/// Later calls are ignored.
pub fn init_logger(level: LogLevel, allow_env_override: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(ui::colors_enabled())
        .with_writer(std::io::stderr)
        .compact();

    // Err only means a subscriber is already installed.
    let _ = tracing_subscriber::registry()
        .with(build_filter(level, allow_env_override))
        .with(fmt_layer)
        .try_init();
}

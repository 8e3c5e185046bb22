//! Terminal output: status messages and the build summary.
//!
//! Everything goes to stderr. Colors are decided once by [`init_colors`];
//! `NO_COLOR`, `FORCE_COLOR` and `--no-color` are honoured.

mod format;
mod messages;

pub use format::{format_duration, format_size, print_build_summary};
pub use messages::{info, success, warning};

/// Check if color output should be enabled.
///
/// Respects NO_COLOR and FORCE_COLOR, then falls back to terminal detection.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::user_attended_stderr()
}

/// Decide once whether stderr output is colored.
pub fn init_colors(no_color: bool) {
    console::set_colors_enabled_stderr(!no_color && should_use_color());
}

pub(crate) fn colors_enabled() -> bool {
    console::colors_enabled_stderr()
}

/// Apply `style` only when colors are enabled.
pub(crate) fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if colors_enabled() {
        style(text)
    } else {
        text.to_string()
    }
}

//! Diagnostic extraction from Rolldown errors.
//!
//! Rolldown reports failures as batched diagnostics whose structure changes
//! between releases. This module flattens them into [`ExtractedDiagnostic`],
//! a small cloneable record that the rest of the crate (and the CLI) can
//! render without depending on Rolldown's error types.

use serde::{Deserialize, Serialize};

/// Extracted diagnostic information from Rolldown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedDiagnostic {
    pub kind: DiagnosticKind,
    pub severity: DiagnosticSeverity,
    pub message: String,
    pub file: Option<String>,
    pub help: Option<String>,
}

/// Diagnostic kind (subset of Rolldown's event kinds this build can hit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    UnresolvedEntry,
    UnresolvedImport,
    ParseError,
    Plugin,
    Other(String),
}

impl std::fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosticKind::UnresolvedEntry => write!(f, "UnresolvedEntry"),
            DiagnosticKind::UnresolvedImport => write!(f, "UnresolvedImport"),
            DiagnosticKind::ParseError => write!(f, "ParseError"),
            DiagnosticKind::Plugin => write!(f, "Plugin"),
            DiagnosticKind::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Diagnostic severity level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticSeverity {
    Error,
    Warning,
}

/// Extract diagnostics from a Rolldown error value.
///
/// Works off the `Debug` rendering so it keeps working across Rolldown
/// releases; batched errors are split into one diagnostic per entry.
pub fn extract_from_rolldown_error(error: &dyn std::fmt::Debug) -> Vec<ExtractedDiagnostic> {
    let error_str = format!("{error:?}");

    let parts: Vec<&str> = error_str
        .split("BuildDiagnostic")
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.ends_with("Batched"))
        .collect();

    if parts.len() > 1 {
        parts.iter().map(|part| extract_single(part)).collect()
    } else {
        vec![extract_single(&error_str)]
    }
}

/// Extract a warning diagnostic from a Rolldown warning value.
pub fn extract_warning(warning: &dyn std::fmt::Debug) -> ExtractedDiagnostic {
    let mut diag = extract_single(&format!("{warning:?}"));
    diag.severity = DiagnosticSeverity::Warning;
    diag
}

fn extract_single(text: &str) -> ExtractedDiagnostic {
    let kind = classify(text);
    let file = extract_file_path(text);
    let help = extract_help_text(text).or_else(|| default_help(&kind));

    ExtractedDiagnostic {
        kind,
        severity: DiagnosticSeverity::Error,
        message: text.to_string(),
        file,
        help,
    }
}

fn classify(text: &str) -> DiagnosticKind {
    if text.contains("UnresolvedEntry") || text.contains("Cannot resolve entry") {
        DiagnosticKind::UnresolvedEntry
    } else if text.contains("UnresolvedImport") || text.contains("Could not resolve") {
        DiagnosticKind::UnresolvedImport
    } else if text.contains("Plugin") || text.contains("plugin") {
        DiagnosticKind::Plugin
    } else if text.contains("Parse error") || text.contains("Expected") {
        DiagnosticKind::ParseError
    } else {
        DiagnosticKind::Other("BundlerError".to_string())
    }
}

fn default_help(kind: &DiagnosticKind) -> Option<String> {
    match kind {
        DiagnosticKind::UnresolvedEntry => {
            Some("Check that every entry point exists relative to the working directory".into())
        }
        DiagnosticKind::UnresolvedImport => {
            Some("Install the missing package or fix the import path".into())
        }
        DiagnosticKind::Plugin => {
            Some("Check the copy step: every `from` pattern must match at least one file".into())
        }
        _ => None,
    }
}

/// Extract a file path (js/ts family) from an error message.
fn extract_file_path(text: &str) -> Option<String> {
    for ext in &[".js", ".mjs", ".cjs", ".jsx", ".ts", ".tsx", ".css"] {
        let Some(pos) = text.find(ext) else {
            continue;
        };
        let before = &text[..pos + ext.len()];
        for indicator in &["\"", "'", "in ", "at ", "file: ", "path: "] {
            if let Some(start) = before.rfind(indicator) {
                let path_str = before[start + indicator.len()..].trim();
                if !path_str.is_empty() {
                    return Some(path_str.to_string());
                }
            }
        }
    }
    None
}

/// Extract help text from error message.
fn extract_help_text(text: &str) -> Option<String> {
    for indicator in &["help: ", "Help: ", "hint: ", "Hint: "] {
        if let Some(pos) = text.find(indicator) {
            let after = &text[pos + indicator.len()..];
            let help_str = after.lines().next().unwrap_or("").trim();
            if !help_str.is_empty() {
                return Some(help_str.to_string());
            }
        }
    }
    None
}

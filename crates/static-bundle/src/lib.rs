//! # static-bundle
//!
//! Static asset build step on top of the Rolldown bundler.
//!
//! A [`BuildConfig`] describes the whole build: the entry points, the
//! optimization flags (bundle, minify, tree-shaking, source maps), the
//! legal-comment policy, the output directory and a [`CopyStep`] that moves
//! vendored files into the output tree. [`build`] bundles every entry with
//! Rolldown into a self-contained browser script and writes every artifact
//! to disk.
//!
//! ## Quick Start
//!
//! ```no_run
//! use static_bundle::{BuildConfig, CopyAsset, CopyStep};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let copy = CopyStep::new()
//!     .asset(CopyAsset::new(
//!         ["./node_modules/bootstrap/dist/js/*.min.js"],
//!         ["./bootstrap/js"],
//!     ))
//!     .asset(CopyAsset::new(
//!         ["./node_modules/bootstrap/dist/css/*.min.css"],
//!         ["./bootstrap/css"],
//!     ));
//!
//! let report = BuildConfig::new(["src/app.js", "src/admin.js"])
//!     .outdir("dist")
//!     .copy(copy)
//!     .build()
//!     .await?;
//!
//! for file in &report.files {
//!     println!("{} ({} bytes)", file.filename, file.size);
//! }
//! # Ok(()) }
//! ```

pub mod config;
pub mod copy;
pub mod diagnostics;
pub mod invoker;
pub mod output;

pub use config::{BuildConfig, LegalComments, LogLevel};
pub use copy::{CopiedFile, CopyAsset, CopyPlugin, CopyStep};
pub use invoker::build;
pub use output::{BuildReport, OutputKind, WrittenFile};

// Re-export the Rolldown types that appear in this crate's public API
pub use rolldown::{BundleOutput, BundlerOptions, SourceMapType};

/// Error types for static-bundle operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Error reported by the Rolldown bundler (including plugin failures).
    #[error("Bundler error: {}", format_bundler_error(.0))]
    Bundler(Vec<diagnostics::ExtractedDiagnostic>),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid output path (e.g., directory traversal attempt).
    #[error("Invalid output path: {0}")]
    InvalidOutputPath(String),

    /// File write operation failed.
    #[error("Write failure: {0}")]
    WriteFailure(String),

    /// Output file already exists and overwrite is disabled.
    #[error("Output exists: {0}")]
    OutputExists(String),
}

/// Result type alias for static-bundle operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a bundler error from a Rolldown error.
    pub fn from_rolldown_batch(error: &dyn std::fmt::Debug) -> Self {
        Error::Bundler(diagnostics::extract_from_rolldown_error(error))
    }
}

/// Format bundler error diagnostics for display.
fn format_bundler_error(diagnostics: &[diagnostics::ExtractedDiagnostic]) -> String {
    match diagnostics {
        [] => "Unknown bundler error".to_string(),
        [diag] => format!("{}: {}", diag.kind, diag.message),
        many => format!(
            "{} errors: {}",
            many.len(),
            many.iter()
                .map(|d| format!("{}: {}", d.kind, d.message))
                .collect::<Vec<_>>()
                .join("; ")
        ),
    }
}

impl miette::Diagnostic for Error {
    fn code(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        Some(Box::new(match self {
            Error::Bundler(_) => "BUNDLER_ERROR",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Io(_) => "IO_ERROR",
            Error::InvalidOutputPath(_) => "INVALID_OUTPUT_PATH",
            Error::WriteFailure(_) => "WRITE_FAILURE",
            Error::OutputExists(_) => "OUTPUT_EXISTS",
        }))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(miette::Severity::Error)
    }

    fn help(&self) -> Option<Box<dyn std::fmt::Display + '_>> {
        match self {
            Error::InvalidConfig(msg) => Some(Box::new(format!(
                "Check the build configuration.\nError: {}",
                msg
            ))),
            Error::InvalidOutputPath(path) => Some(Box::new(format!(
                "The output path '{}' is invalid. Output files must stay inside the output directory.",
                path
            ))),
            Error::WriteFailure(msg) => Some(Box::new(format!(
                "Failed to write file. Check disk space and permissions.\nError: {}",
                msg
            ))),
            Error::OutputExists(msg) => Some(Box::new(format!(
                "Output file already exists: {}\nEnable allowOverwrite to replace existing files.",
                msg
            ))),
            Error::Bundler(diagnostics) => match diagnostics.as_slice() {
                [diag] => diag
                    .help
                    .as_ref()
                    .map(|h| Box::new(h.clone()) as Box<dyn std::fmt::Display>),
                [] => None,
                _ => Some(Box::new(
                    "Multiple bundler errors occurred. See details above.".to_string(),
                )),
            },
            Error::Io(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diagnostics::{DiagnosticKind, DiagnosticSeverity, ExtractedDiagnostic};
    use miette::Diagnostic;

    fn diag(kind: DiagnosticKind, message: &str) -> ExtractedDiagnostic {
        ExtractedDiagnostic {
            kind,
            severity: DiagnosticSeverity::Error,
            message: message.to_string(),
            file: None,
            help: None,
        }
    }

    #[test]
    fn test_bundler_error_single_display() {
        let err = Error::Bundler(vec![diag(DiagnosticKind::UnresolvedEntry, "missing a.js")]);
        assert_eq!(
            err.to_string(),
            "Bundler error: UnresolvedEntry: missing a.js"
        );
    }

    #[test]
    fn test_bundler_error_multiple_display() {
        let err = Error::Bundler(vec![
            diag(DiagnosticKind::UnresolvedEntry, "missing a.js"),
            diag(DiagnosticKind::Plugin, "no match"),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("2 errors"));
        assert!(msg.contains("Plugin: no match"));
    }

    #[test]
    fn test_bundler_error_empty_display() {
        let err = Error::Bundler(Vec::new());
        assert!(err.to_string().contains("Unknown bundler error"));
    }

    #[test]
    fn test_diagnostic_codes() {
        let err = Error::OutputExists("dist/a.js".to_string());
        assert_eq!(err.code().unwrap().to_string(), "OUTPUT_EXISTS");
        assert!(err.help().unwrap().to_string().contains("allowOverwrite"));

        let err = Error::WriteFailure("disk full".to_string());
        assert_eq!(err.code().unwrap().to_string(), "WRITE_FAILURE");
    }
}

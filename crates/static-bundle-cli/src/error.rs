//! Error handling for the CLI.
//!
//! `CliError` is what commands return. Configuration and build failures
//! carry their own enums so each message can end with a hint the user can
//! act on. [`cli_error_to_miette`] turns the final error into a report for
//! `main`.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The build itself failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist
    #[error("Config file not found: {}\n\nHint: Create static-bundle.json or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// No inline entries and no manifest to read them from
    #[error("Entry point manifest not found: {}\n\nHint: Create it as a JSON array of paths or set 'entryPoints' in static-bundle.json", .0.display())]
    ManifestNotFound(PathBuf),

    /// The manifest exists but is not a JSON array of strings
    #[error("Invalid entry point manifest {}: {source}\n\nHint: The manifest must be a JSON array of paths, e.g. [\"src/app.js\"]", .path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Missing required configuration field
    #[error("Missing required field: {field}\n\nHint: {hint}")]
    MissingField { field: String, hint: String },

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        field: String,
        value: String,
        hint: String,
    },

    /// I/O error while reading config
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
}

/// Build process errors.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Output directory exists but is not a directory
    #[error("Output path is not a directory: {}\n\nHint: Remove the file or set a different 'outdir'", .0.display())]
    OutputNotDirectory(PathBuf),

    /// Failure reported by the bundling library
    #[error(transparent)]
    Bundle(#[from] static_bundle::Error),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

impl From<static_bundle::Error> for CliError {
    fn from(err: static_bundle::Error) -> Self {
        CliError::Build(BuildError::Bundle(err))
    }
}

/// Convert a CLI error into a miette report.
///
/// Library errors keep their own diagnostic code and help text.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Build(BuildError::Bundle(e)) => Report::new(e),
        CliError::Config(e) => miette::miette!("Configuration error: {}", e),
        other => miette::miette!("{}", other),
    }
}

//! Command-line front end for `static-bundle`.
//!
//! Running the binary with no arguments performs the stock asset build:
//! entries from `entryPoints.json`, bundled, minified and tree-shaken into
//! `dist/` with external source maps, plus Bootstrap's minified JS and CSS
//! copied to `dist/bootstrap/`.
//!
//! - [`cli`] - argument parsing
//! - [`config`] - layered configuration (defaults, file, environment, flags)
//! - [`commands`] - the build command
//! - [`error`] - error types with actionable hints
//! - [`logger`] - tracing subscriber setup
//! - [`ui`] - terminal output helpers

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod ui;

pub use error::{BuildError, CliError, ConfigError, Result};

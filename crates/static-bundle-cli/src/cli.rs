//! Command-line interface definition.

use std::path::PathBuf;

use clap::Parser;

/// Bundle, minify and tree-shake the application's entry points into an
/// output directory and copy vendored assets next to them.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "static-bundle",
    version,
    about = "Build the static assets of a web application",
    long_about = "Bundles every entry point listed in entryPoints.json (or the config file)\n\
                  into dist/ with minification, tree-shaking and external source maps, and\n\
                  copies Bootstrap's minified JS and CSS into dist/bootstrap/."
)]
pub struct Cli {
    /// Path to a JSON config file (default: static-bundle.json if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Working directory for entries, copy patterns and the output directory
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

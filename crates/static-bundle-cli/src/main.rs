//! `static-bundle` - build the static assets of a web application.
//!
//! Parses arguments and runs the build. Any error is rendered as a miette
//! diagnostic and the process exits non-zero.

use clap::Parser;
use miette::Result;
use static_bundle_cli::{cli, commands, error, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    ui::init_colors(args.no_color);

    // The logger is installed once the configured log level is known.
    commands::build_execute(args)
        .await
        .map_err(error::cli_error_to_miette)
}

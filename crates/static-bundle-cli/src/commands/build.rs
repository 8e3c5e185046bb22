//! Build command implementation.

use std::path::Path;
use std::time::Instant;

use static_bundle::{BuildReport, LogLevel};

use crate::cli::Cli;
use crate::config::StaticBundleConfig;
use crate::error::{BuildError, Result};
use crate::{logger, ui};

/// Execute the build.
///
/// 1. Load configuration (flags > env > file > defaults)
/// 2. Install the logger at the configured level
/// 3. Resolve entry points (inline or from the manifest) and validate
/// 4. Run the library build
/// 5. Print the summary
pub async fn execute(args: Cli) -> Result<()> {
    let started = Instant::now();

    let mut config = StaticBundleConfig::load(&args)?;
    logger::init_logger(config.log_level, !(args.verbose || args.quiet));

    let cwd = match config.cwd.clone() {
        Some(cwd) => cwd,
        None => std::env::current_dir()?,
    };

    config.resolve_entry_points(&cwd)?;
    config.validate()?;

    let chatty = config.log_level.allows(LogLevel::Info);
    if chatty {
        ui::info(&format!(
            "Building {} entr{} into {}",
            config.entry_points.len(),
            if config.entry_points.len() == 1 { "y" } else { "ies" },
            config.outdir.display()
        ));
    }

    ensure_output_dir_usable(&cwd.join(&config.outdir))?;

    let report = config
        .into_build_config(&cwd)
        .build()
        .await
        .map_err(BuildError::from)?;

    if chatty {
        report_outcome(&report, started);
    }

    Ok(())
}

/// An existing non-directory at the output path cannot be written into.
fn ensure_output_dir_usable(outdir: &Path) -> Result<()> {
    if outdir.exists() && !outdir.is_dir() {
        return Err(BuildError::OutputNotDirectory(outdir.to_path_buf()).into());
    }
    Ok(())
}

fn report_outcome(report: &BuildReport, started: Instant) {
    for warning in &report.warnings {
        ui::warning(&warning.message);
    }

    let elapsed = started.elapsed();
    ui::print_build_summary(report, elapsed);
    ui::success(&format!(
        "Build completed in {}",
        ui::format_duration(elapsed)
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_output_dir_may_be_missing() {
        let dir = TempDir::new().unwrap();
        assert!(ensure_output_dir_usable(&dir.path().join("dist")).is_ok());
    }

    #[test]
    fn test_output_dir_must_not_be_a_file() {
        let dir = TempDir::new().unwrap();
        let outdir = dir.path().join("dist");
        std::fs::write(&outdir, "not a directory").unwrap();

        let err = ensure_output_dir_usable(&outdir).unwrap_err();
        assert!(err.to_string().contains("not a directory"));
    }

    #[tokio::test]
    async fn test_execute_fails_without_entries() {
        let dir = TempDir::new().unwrap();
        let args = Cli {
            cwd: Some(dir.path().to_path_buf()),
            quiet: true,
            ..Default::default()
        };

        let err = execute(args).await.unwrap_err();
        assert!(err.to_string().contains("entryPoints.json"));
    }
}

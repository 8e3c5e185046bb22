//! File writing for bundle output.
//!
//! Every output path is normalized and must stay inside the output
//! directory. Files are written to a temporary sibling and renamed into
//! place, so a reader never sees a half-written bundle file. There is no
//! rollback across files: if the third rename fails, the first two outputs
//! stay replaced.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use path_clean::PathClean;
use rolldown_common::Output;
use tracing::warn;

use crate::{Error, Result};

/// One pending write: target path plus content.
pub(crate) struct WriteOp<'a> {
    pub filename: &'a str,
    pub target: PathBuf,
    pub content: &'a [u8],
}

/// Writes every chunk and asset of `outputs` under `dir`.
///
/// Returns the operations performed, in bundle order.
///
/// # Errors
///
/// - `InvalidOutputPath` if a filename escapes `dir`
/// - `OutputExists` if a target exists and `overwrite` is `false`
///   (checked for every file before anything is written)
/// - `WriteFailure` for I/O failures
pub(crate) fn write_outputs<'a>(
    outputs: &'a [Output],
    dir: &Path,
    overwrite: bool,
) -> Result<Vec<WriteOp<'a>>> {
    let dir = validate_and_normalize_dir(dir)?;

    let mut operations = Vec::with_capacity(outputs.len());
    for output in outputs {
        let (filename, content) = match output {
            Output::Asset(asset) => (asset.filename.as_str(), asset.source.as_bytes()),
            Output::Chunk(chunk) => (chunk.filename.as_str(), chunk.code.as_bytes()),
        };

        let target = validate_output_path(&dir, filename)?;
        if !overwrite && target.exists() {
            return Err(Error::OutputExists(format!(
                "File already exists: '{}'. Enable allowOverwrite to replace.",
                target.display()
            )));
        }

        operations.push(WriteOp {
            filename,
            target,
            content,
        });
    }

    fs::create_dir_all(&dir).map_err(|e| {
        Error::WriteFailure(format!(
            "Failed to create output directory '{}': {}",
            dir.display(),
            e
        ))
    })?;

    write_files(&operations)?;

    Ok(operations)
}

/// Normalizes a directory path and makes it absolute.
fn validate_and_normalize_dir(dir: &Path) -> Result<PathBuf> {
    let cleaned = dir.clean();

    if cleaned.is_absolute() {
        return Ok(cleaned);
    }

    let cwd = std::env::current_dir().map_err(|e| {
        Error::InvalidOutputPath(format!("Failed to get current directory: {}", e))
    })?;
    Ok(cwd.join(&cleaned).clean())
}

/// Joins `filename` onto `base_dir`, rejecting anything that escapes it.
fn validate_output_path(base_dir: &Path, filename: &str) -> Result<PathBuf> {
    if filename.contains('\0') {
        return Err(Error::InvalidOutputPath(
            "Filename contains null byte".to_string(),
        ));
    }

    let full_path = base_dir.join(Path::new(filename).clean()).clean();

    if !full_path.starts_with(base_dir) || full_path == base_dir {
        return Err(Error::InvalidOutputPath(format!(
            "Path '{}' escapes output directory '{}' (resolved to '{}')",
            filename,
            base_dir.display(),
            full_path.display()
        )));
    }

    Ok(full_path)
}

fn temp_path_for(target: &Path) -> PathBuf {
    let mut name: OsString = target.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write to temp files, then rename them into place.
fn write_files(operations: &[WriteOp<'_>]) -> Result<()> {
    let mut temp_files = Vec::with_capacity(operations.len());

    for op in operations {
        if let Some(parent) = op.target.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                cleanup_temp_files(&temp_files);
                Error::WriteFailure(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let temp_path = temp_path_for(&op.target);
        fs::write(&temp_path, op.content).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to write temporary file '{}': {}",
                temp_path.display(),
                e
            ))
        })?;

        temp_files.push((temp_path, op.target.clone()));
    }

    for (temp_path, target_path) in &temp_files {
        fs::rename(temp_path, target_path).map_err(|e| {
            cleanup_temp_files(&temp_files);
            Error::WriteFailure(format!(
                "Failed to rename '{}' to '{}': {}",
                temp_path.display(),
                target_path.display(),
                e
            ))
        })?;
    }

    Ok(())
}

/// Best-effort removal of leftover temp files.
fn cleanup_temp_files(temp_files: &[(PathBuf, PathBuf)]) {
    for (temp_path, _) in temp_files {
        if temp_path.exists() {
            if let Err(e) = fs::remove_file(temp_path) {
                warn!(
                    path = %temp_path.display(),
                    error = %e,
                    "failed to clean up temporary file"
                );
            }
        }
    }
}

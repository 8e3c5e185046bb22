//! Build results and how they reach disk.

mod writer;

use std::collections::HashSet;
use std::path::Path;

use rolldown_common::Output;
use serde::Serialize;

use crate::copy::CopiedFile;
use crate::diagnostics::ExtractedDiagnostic;
use crate::Result;

/// What a written file is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    /// Bundled JavaScript for an entry point.
    Chunk,
    /// Any other engine-emitted asset.
    Asset,
    /// External `.map` file.
    Sourcemap,
    /// Vendored file added by the copy step.
    Copied,
}

impl std::fmt::Display for OutputKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OutputKind::Chunk => "chunk",
            OutputKind::Asset => "asset",
            OutputKind::Sourcemap => "sourcemap",
            OutputKind::Copied => "copied",
        };
        f.write_str(s)
    }
}

/// One file written to the output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WrittenFile {
    /// Path relative to the output directory, `/`-separated.
    pub filename: String,
    /// Size in bytes.
    pub size: u64,
    pub kind: OutputKind,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub files: Vec<WrittenFile>,
    /// Engine warnings (the build still succeeded).
    pub warnings: Vec<ExtractedDiagnostic>,
}

impl BuildReport {
    /// Files of the given kind, in write order.
    pub fn files_of(&self, kind: OutputKind) -> impl Iterator<Item = &WrittenFile> {
        self.files.iter().filter(move |f| f.kind == kind)
    }

    /// Combined size of every written file.
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Write `outputs` under `dir` and describe what landed there.
///
/// `copied` names the assets contributed by the copy step so they are
/// reported as [`OutputKind::Copied`] rather than generic assets.
pub(crate) fn write_bundle_to(
    outputs: &[Output],
    dir: &Path,
    overwrite: bool,
    copied: &[CopiedFile],
) -> Result<Vec<WrittenFile>> {
    let copied: HashSet<&str> = copied.iter().map(|f| f.filename.as_str()).collect();

    let written = writer::write_outputs(outputs, dir, overwrite)?
        .into_iter()
        .zip(outputs)
        .map(|(op, output)| WrittenFile {
            filename: op.filename.to_string(),
            size: op.content.len() as u64,
            kind: classify(output, op.filename, &copied),
        })
        .collect();

    Ok(written)
}

fn classify(output: &Output, filename: &str, copied: &HashSet<&str>) -> OutputKind {
    match output {
        Output::Chunk(_) => OutputKind::Chunk,
        Output::Asset(_) if copied.contains(filename) => OutputKind::Copied,
        Output::Asset(_) if filename.ends_with(".map") => OutputKind::Sourcemap,
        Output::Asset(_) => OutputKind::Asset,
    }
}

//! Vendored asset copying.
//!
//! A [`CopyStep`] is an ordered list of [`CopyAsset`] mappings. Each mapping
//! names one or more glob patterns (`from`) and one or more destination
//! directories (`to`, relative to the output directory). The step runs as a
//! Rolldown plugin in the `generate_bundle` phase: every matched file is read
//! as raw bytes and added to the bundle as an asset, so the writer puts the
//! copies on disk together with the chunks.
//!
//! A pattern that matches nothing fails the build.

use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, bail};
use parking_lot::Mutex;
use path_clean::PathClean;
use rolldown_common::{Output, OutputAsset, StrOrBytes};
use rolldown_plugin::{HookGenerateBundleArgs, HookNoopReturn, HookUsage, Plugin, PluginContext};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// One `from` → `to` copy mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyAsset {
    /// Glob patterns, relative to the working directory.
    pub from: Vec<String>,
    /// Destination directories, relative to the output directory.
    pub to: Vec<String>,
}

impl CopyAsset {
    pub fn new(
        from: impl IntoIterator<Item = impl Into<String>>,
        to: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            from: from.into_iter().map(Into::into).collect(),
            to: to.into_iter().map(Into::into).collect(),
        }
    }
}

/// Ordered list of copy mappings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CopyStep {
    assets: Vec<CopyAsset>,
}

impl CopyStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a mapping.
    pub fn asset(mut self, asset: CopyAsset) -> Self {
        self.assets.push(asset);
        self
    }

    pub fn assets(&self) -> &[CopyAsset] {
        &self.assets
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Every mapping needs at least one source pattern and one destination.
    pub fn validate(&self) -> Result<()> {
        for (index, asset) in self.assets.iter().enumerate() {
            if asset.from.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "copy[{index}]: 'from' needs at least one pattern"
                )));
            }
            if asset.to.is_empty() {
                return Err(Error::InvalidConfig(format!(
                    "copy[{index}]: 'to' needs at least one directory"
                )));
            }
            if let Some(pattern) = asset.from.iter().find(|p| glob::Pattern::new(p).is_err()) {
                return Err(Error::InvalidConfig(format!(
                    "copy[{index}]: invalid glob pattern '{pattern}'"
                )));
            }
        }
        Ok(())
    }
}

impl From<Vec<CopyAsset>> for CopyStep {
    fn from(assets: Vec<CopyAsset>) -> Self {
        Self { assets }
    }
}

/// A file the copy plugin added to the bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopiedFile {
    /// Source file on disk.
    pub source: PathBuf,
    /// Output filename, relative to the output directory.
    pub filename: String,
}

/// Rolldown plugin that adds vendored files to the bundle.
#[derive(Debug, Clone)]
pub struct CopyPlugin {
    step: CopyStep,
    cwd: PathBuf,
    copied: Arc<Mutex<Vec<CopiedFile>>>,
}

impl CopyPlugin {
    pub fn new(step: CopyStep, cwd: impl Into<PathBuf>) -> Self {
        Self {
            step,
            cwd: cwd.into(),
            copied: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Files copied by the last `generate_bundle` run.
    pub fn take_copied(&self) -> Vec<CopiedFile> {
        std::mem::take(&mut *self.copied.lock())
    }

    /// Expand every mapping into `(source, output filename)` pairs.
    ///
    /// Later mappings win when two sources land on the same output name.
    pub fn plan(&self) -> anyhow::Result<Vec<CopiedFile>> {
        let mut plan: Vec<CopiedFile> = Vec::new();

        for asset in self.step.assets() {
            for pattern in &asset.from {
                let sources = expand_pattern(&self.cwd, pattern)?;
                debug!(pattern = %pattern, matches = sources.len(), "copy pattern expanded");

                for source in sources {
                    let Some(name) = source.file_name().map(|n| n.to_string_lossy().into_owned())
                    else {
                        continue;
                    };
                    for dest in &asset.to {
                        let filename = destination_name(dest, &name);
                        plan.retain(|f| f.filename != filename);
                        plan.push(CopiedFile {
                            source: source.clone(),
                            filename,
                        });
                    }
                }
            }
        }

        Ok(plan)
    }
}

impl Plugin for CopyPlugin {
    fn name(&self) -> Cow<'static, str> {
        "static-bundle:copy".into()
    }

    fn register_hook_usage(&self) -> HookUsage {
        HookUsage::GenerateBundle
    }

    /// Add every matched file to the bundle as an asset.
    fn generate_bundle(
        &self,
        _ctx: &PluginContext,
        args: &mut HookGenerateBundleArgs<'_>,
    ) -> impl std::future::Future<Output = HookNoopReturn> + Send {
        let plan = self.plan();
        let copied = Arc::clone(&self.copied);

        async move {
            let plan = plan?;
            let mut assets = Vec::with_capacity(plan.len());

            for file in &plan {
                let bytes = tokio::fs::read(&file.source)
                    .await
                    .with_context(|| format!("Failed to read '{}'", file.source.display()))?;

                assets.push(Output::Asset(Arc::new(OutputAsset {
                    names: vec![],
                    original_file_names: vec![file.source.to_string_lossy().into_owned()],
                    filename: file.filename.clone().into(),
                    source: StrOrBytes::Bytes(bytes),
                })));
            }

            args.bundle.extend(assets);
            *copied.lock() = plan;

            Ok(())
        }
    }
}

/// Expand a glob pattern relative to `cwd` into matching regular files.
fn expand_pattern(cwd: &Path, pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let relative = Path::new(pattern).clean();
    let full = if relative.is_absolute() {
        relative.to_string_lossy().into_owned()
    } else {
        let base = glob::Pattern::escape(&cwd.to_string_lossy());
        format!("{}/{}", base.trim_end_matches('/'), relative.to_string_lossy())
    };

    let entries = glob::glob(&full)
        .with_context(|| format!("Invalid glob pattern '{}'", pattern))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.with_context(|| format!("Failed to read match for '{}'", pattern))?;
        if path.is_file() {
            files.push(path);
        }
    }

    if files.is_empty() {
        bail!(
            "Copy source '{}' matched no files (searched from {})",
            pattern,
            cwd.display()
        );
    }

    files.sort();
    Ok(files)
}

/// Output filename for `name` copied into `dir` (relative to the output dir).
fn destination_name(dir: &str, name: &str) -> String {
    let cleaned = Path::new(dir).clean();
    let dir = cleaned
        .to_string_lossy()
        .replace('\\', "/")
        .trim_start_matches('/')
        .to_string();

    if dir.is_empty() || dir == "." {
        name.to_string()
    } else {
        format!("{}/{}", dir, name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn vendor_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let js = dir.path().join("node_modules/bootstrap/dist/js");
        let css = dir.path().join("node_modules/bootstrap/dist/css");
        fs::create_dir_all(&js).unwrap();
        fs::create_dir_all(&css).unwrap();
        fs::write(js.join("bootstrap.min.js"), "/*! bs */!function(){}();").unwrap();
        fs::write(js.join("bootstrap.bundle.min.js"), "!function(){}();").unwrap();
        fs::write(js.join("bootstrap.js"), "function bootstrap() {}").unwrap();
        fs::write(css.join("bootstrap.min.css"), "body{margin:0}").unwrap();
        dir
    }

    #[test]
    fn test_destination_name() {
        assert_eq!(destination_name("./bootstrap/js", "a.min.js"), "bootstrap/js/a.min.js");
        assert_eq!(destination_name("bootstrap/css/", "a.css"), "bootstrap/css/a.css");
        assert_eq!(destination_name(".", "a.css"), "a.css");
        assert_eq!(destination_name("", "a.css"), "a.css");
    }

    #[test]
    fn test_plan_matches_only_minified_files() {
        let project = vendor_tree();
        let step = CopyStep::new()
            .asset(CopyAsset::new(
                ["./node_modules/bootstrap/dist/js/*.min.js"],
                ["./bootstrap/js"],
            ))
            .asset(CopyAsset::new(
                ["./node_modules/bootstrap/dist/css/*.min.css"],
                ["./bootstrap/css"],
            ));

        let plan = CopyPlugin::new(step, project.path()).plan().unwrap();
        let names: Vec<_> = plan.iter().map(|f| f.filename.as_str()).collect();

        assert_eq!(
            names,
            vec![
                "bootstrap/js/bootstrap.bundle.min.js",
                "bootstrap/js/bootstrap.min.js",
                "bootstrap/css/bootstrap.min.css",
            ]
        );
    }

    #[test]
    fn test_plan_fans_out_to_every_destination() {
        let project = vendor_tree();
        let step = CopyStep::new().asset(CopyAsset::new(
            ["node_modules/bootstrap/dist/css/*.min.css"],
            ["css", "legacy/css"],
        ));

        let plan = CopyPlugin::new(step, project.path()).plan().unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[0].filename, "css/bootstrap.min.css");
        assert_eq!(plan[1].filename, "legacy/css/bootstrap.min.css");
        assert_eq!(plan[0].source, plan[1].source);
    }

    #[test]
    fn test_plan_later_mapping_wins() {
        let project = vendor_tree();
        fs::write(project.path().join("bootstrap.min.css"), "override").unwrap();
        let step = CopyStep::new()
            .asset(CopyAsset::new(["node_modules/bootstrap/dist/css/*.css"], ["css"]))
            .asset(CopyAsset::new(["bootstrap.min.css"], ["css"]));

        let plan = CopyPlugin::new(step, project.path()).plan().unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].source, project.path().join("bootstrap.min.css"));
    }

    #[test]
    fn test_plan_errors_when_nothing_matches() {
        let project = vendor_tree();
        let step = CopyStep::new().asset(CopyAsset::new(["missing/*.js"], ["vendor"]));

        let err = CopyPlugin::new(step, project.path()).plan().unwrap_err();
        assert!(err.to_string().contains("matched no files"));
    }

    #[test]
    fn test_validate_rejects_bad_mappings() {
        assert!(CopyStep::new().validate().is_ok());
        assert!(CopyStep::new()
            .asset(CopyAsset::new(["a/*.js"], Vec::<String>::new()))
            .validate()
            .is_err());
        assert!(CopyStep::new()
            .asset(CopyAsset::new(["a/[.js"], ["b"]))
            .validate()
            .is_err());
    }

    #[test]
    fn test_copy_step_deserializes_from_list() {
        let step: CopyStep = serde_json::from_str(
            r#"[{ "from": ["./vendor/*.js"], "to": ["./js"] }]"#,
        )
        .unwrap();
        assert_eq!(step.assets().len(), 1);
        assert_eq!(step.assets()[0].to, vec!["./js"]);
    }
}

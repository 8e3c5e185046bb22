//! Configuration with multi-source loading.
//!
//! Priority: flags > environment (`STATIC_BUNDLE_*`) > config file > defaults.
//! The defaults reproduce the stock asset build, so a project with only an
//! `entryPoints.json` needs no config file at all.

mod defaults;
mod loading;
mod manifest;
mod validation;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use static_bundle::{BuildConfig, CopyStep, LegalComments, LogLevel};

pub use defaults::*;
pub use loading::CONFIG_FILE_NAME;
pub use manifest::load_entry_manifest;

/// Configuration loaded from `static-bundle.json`, the environment and flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StaticBundleConfig {
    /// Entry points to bundle. When empty they come from `entryPointsFile`.
    #[serde(default)]
    pub entry_points: Vec<String>,

    /// JSON manifest listing the entry points
    #[serde(default = "default_entry_points_file")]
    pub entry_points_file: PathBuf,

    #[serde(default = "default_true")]
    pub bundle: bool,

    #[serde(default = "default_true")]
    pub minify: bool,

    #[serde(default = "default_true")]
    pub tree_shaking: bool,

    /// External `.map` file per output
    #[serde(default = "default_true")]
    pub sourcemap: bool,

    #[serde(default = "default_outdir")]
    pub outdir: PathBuf,

    #[serde(default)]
    pub legal_comments: LegalComments,

    #[serde(default = "default_true")]
    pub allow_overwrite: bool,

    #[serde(default)]
    pub log_level: LogLevel,

    /// Files to copy into the output directory
    #[serde(default = "default_copy")]
    pub copy: CopyStep,

    /// Working directory (set by `--cwd`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<PathBuf>,
}

impl Default for StaticBundleConfig {
    fn default() -> Self {
        Self {
            entry_points: Vec::new(),
            entry_points_file: default_entry_points_file(),
            bundle: true,
            minify: true,
            tree_shaking: true,
            sourcemap: true,
            outdir: default_outdir(),
            legal_comments: LegalComments::None,
            allow_overwrite: true,
            log_level: LogLevel::Info,
            copy: default_copy(),
            cwd: None,
        }
    }
}

impl StaticBundleConfig {
    /// Turn this configuration into a library [`BuildConfig`].
    ///
    /// `entry_points` must already be resolved (see [`Self::resolve_entry_points`]).
    pub fn into_build_config(self, cwd: &Path) -> BuildConfig {
        BuildConfig::new(self.entry_points)
            .bundle(self.bundle)
            .minify(self.minify)
            .tree_shaking(self.tree_shaking)
            .sourcemap(self.sourcemap)
            .outdir(self.outdir)
            .legal_comments(self.legal_comments)
            .allow_overwrite(self.allow_overwrite)
            .log_level(self.log_level)
            .copy(self.copy)
            .cwd(cwd)
    }
}

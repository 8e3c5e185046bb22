//! Build configuration types.
//!
//! [`BuildConfig`] is a value object: it is assembled once, handed to
//! [`crate::build`] and dropped when the build call returns. Defaults match a
//! production asset build: bundled, minified, tree-shaken, source-mapped,
//! legal comments stripped, written to `dist/` with overwrite allowed.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::copy::CopyStep;
use crate::{BuildReport, Error, Result};

/// What to do with legal comments (`/*! ... */`, `@license`, `@preserve`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegalComments {
    /// Strip them entirely.
    #[default]
    None,
    /// Keep them in place.
    Inline,
}

impl LegalComments {
    pub(crate) fn to_rolldown(self) -> rolldown_common::LegalComments {
        match self {
            LegalComments::None => rolldown_common::LegalComments::None,
            LegalComments::Inline => rolldown_common::LegalComments::Inline,
        }
    }
}

impl std::str::FromStr for LegalComments {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(LegalComments::None),
            "inline" => Ok(LegalComments::Inline),
            other => Err(format!("Invalid legal comments policy: {}", other)),
        }
    }
}

/// Log level for build output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging output
    #[serde(alias = "off")]
    Silent,
    /// Only errors
    Error,
    /// Errors and warnings
    #[serde(alias = "warning")]
    Warn,
    /// Errors, warnings, and info (default)
    #[default]
    Info,
    /// All logs including debug
    Debug,
}

impl LogLevel {
    /// Convert to a tracing filter directive.
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Whether messages at `level` pass this verbosity.
    pub fn allows(&self, level: LogLevel) -> bool {
        level != LogLevel::Silent && level <= *self
    }
}

impl std::str::FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter())
    }
}

/// Build configuration
///
/// Use the builder methods to override the defaults.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Entry points, in order. Each one produces its own output file.
    pub entry_points: Vec<String>,

    /// Bundle dependencies into the output. When disabled, bare imports
    /// stay external.
    pub bundle: bool,

    /// Minify the output.
    pub minify: bool,

    /// Drop unreferenced code.
    pub tree_shaking: bool,

    /// Emit an external `.map` file next to every output.
    pub sourcemap: bool,

    /// Output directory (relative paths resolve against `cwd`).
    pub outdir: PathBuf,

    /// Legal comment policy.
    pub legal_comments: LegalComments,

    /// Replace files that already exist in `outdir`.
    pub allow_overwrite: bool,

    /// Verbosity of build output. Events are filtered by the installed
    /// subscriber; use [`LogLevel::as_filter`] to build its directive.
    pub log_level: LogLevel,

    /// Vendored files to copy into `outdir`.
    pub copy: CopyStep,

    /// Base directory for entries, copy globs and `outdir`.
    pub cwd: Option<PathBuf>,
}

impl BuildConfig {
    /// Create a new BuildConfig for the given entry points.
    pub fn new(entry_points: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            entry_points: entry_points.into_iter().map(Into::into).collect(),
            bundle: true,
            minify: true,
            tree_shaking: true,
            sourcemap: true,
            outdir: PathBuf::from("dist"),
            legal_comments: LegalComments::None,
            allow_overwrite: true,
            log_level: LogLevel::Info,
            copy: CopyStep::new(),
            cwd: None,
        }
    }

    /// Enable or disable bundling
    pub fn bundle(mut self, enabled: bool) -> Self {
        self.bundle = enabled;
        self
    }

    /// Enable or disable minification
    pub fn minify(mut self, enabled: bool) -> Self {
        self.minify = enabled;
        self
    }

    /// Enable or disable tree-shaking
    pub fn tree_shaking(mut self, enabled: bool) -> Self {
        self.tree_shaking = enabled;
        self
    }

    /// Enable or disable external source maps
    pub fn sourcemap(mut self, enabled: bool) -> Self {
        self.sourcemap = enabled;
        self
    }

    /// Set the output directory
    pub fn outdir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.outdir = dir.into();
        self
    }

    /// Set the legal comment policy
    pub fn legal_comments(mut self, policy: LegalComments) -> Self {
        self.legal_comments = policy;
        self
    }

    /// Allow or forbid replacing existing output files
    pub fn allow_overwrite(mut self, allowed: bool) -> Self {
        self.allow_overwrite = allowed;
        self
    }

    /// Set the log level
    pub fn log_level(mut self, level: LogLevel) -> Self {
        self.log_level = level;
        self
    }

    /// Set the copy step
    pub fn copy(mut self, copy: CopyStep) -> Self {
        self.copy = copy;
        self
    }

    /// Set the working directory
    pub fn cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    /// Working directory, falling back to the process cwd.
    pub fn resolved_cwd(&self) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => Ok(cwd.clone()),
            None => Ok(std::env::current_dir()?),
        }
    }

    /// Output directory resolved against the working directory.
    pub fn resolved_outdir(&self) -> Result<PathBuf> {
        Ok(resolve_against(&self.resolved_cwd()?, &self.outdir))
    }

    /// Check the parts of the configuration the engine cannot check for us.
    pub fn validate(&self) -> Result<()> {
        if self.entry_points.is_empty() {
            return Err(Error::InvalidConfig(
                "At least one entry point is required".to_string(),
            ));
        }
        if self.outdir.as_os_str().is_empty() {
            return Err(Error::InvalidConfig(
                "Output directory cannot be empty".to_string(),
            ));
        }
        self.copy.validate()
    }

    /// Run the build described by this configuration.
    pub async fn build(self) -> Result<BuildReport> {
        crate::build(self).await
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CopyAsset;

    #[test]
    fn test_defaults_match_production_build() {
        let config = BuildConfig::new(["a.js", "b.js"]);
        assert_eq!(config.entry_points, vec!["a.js", "b.js"]);
        assert!(config.bundle);
        assert!(config.minify);
        assert!(config.tree_shaking);
        assert!(config.sourcemap);
        assert_eq!(config.outdir, PathBuf::from("dist"));
        assert_eq!(config.legal_comments, LegalComments::None);
        assert!(config.allow_overwrite);
        assert_eq!(config.log_level, LogLevel::Info);
        assert!(config.copy.is_empty());
    }

    #[test]
    fn test_builder_methods() {
        let config = BuildConfig::new(["a.js"])
            .bundle(false)
            .minify(false)
            .tree_shaking(false)
            .sourcemap(false)
            .outdir("public")
            .legal_comments(LegalComments::Inline)
            .allow_overwrite(false)
            .log_level(LogLevel::Debug)
            .cwd("/project");

        assert!(!config.bundle);
        assert!(!config.minify);
        assert!(!config.tree_shaking);
        assert!(!config.sourcemap);
        assert_eq!(config.outdir, PathBuf::from("public"));
        assert_eq!(config.legal_comments, LegalComments::Inline);
        assert!(!config.allow_overwrite);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(
            config.resolved_outdir().unwrap(),
            PathBuf::from("/project/public")
        );
    }

    #[test]
    fn test_absolute_outdir_is_kept() {
        let config = BuildConfig::new(["a.js"]).outdir("/srv/static").cwd("/project");
        assert_eq!(config.resolved_outdir().unwrap(), PathBuf::from("/srv/static"));
    }

    #[test]
    fn test_validate_requires_entries() {
        let config = BuildConfig::new(Vec::<String>::new());
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_checks_copy_step() {
        let config = BuildConfig::new(["a.js"])
            .copy(CopyStep::new().asset(CopyAsset::new(Vec::<String>::new(), ["vendor"])));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_level_from_str() {
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Silent);
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_log_level_allows() {
        assert!(LogLevel::Info.allows(LogLevel::Warn));
        assert!(LogLevel::Info.allows(LogLevel::Info));
        assert!(!LogLevel::Info.allows(LogLevel::Debug));
        assert!(!LogLevel::Silent.allows(LogLevel::Error));
        assert!(!LogLevel::Debug.allows(LogLevel::Silent));
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevel::Info.to_string(), "info");
        assert_eq!(LogLevel::Silent.to_string(), "off");
    }

    #[test]
    fn test_legal_comments_from_str() {
        assert_eq!("none".parse::<LegalComments>().unwrap(), LegalComments::None);
        assert_eq!("Inline".parse::<LegalComments>().unwrap(), LegalComments::Inline);
        assert!("eof".parse::<LegalComments>().is_err());
    }
}

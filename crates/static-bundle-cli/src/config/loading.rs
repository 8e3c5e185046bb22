use std::path::{Path, PathBuf};

use figment::{Figment, providers::{Env, Format as _, Json, Serialized}};
use serde::Serialize;
use static_bundle::LogLevel;

use crate::cli::Cli;
use crate::config::StaticBundleConfig;
use crate::error::{ConfigError, Result};

/// Config file picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "static-bundle.json";

const ENV_PREFIX: &str = "STATIC_BUNDLE_";

/// The subset of flags that override configuration values.
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct FlagOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    cwd: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<LogLevel>,
}

impl FlagOverrides {
    fn from_cli(args: &Cli, project_dir: &Path) -> Self {
        let log_level = if args.verbose {
            Some(LogLevel::Debug)
        } else if args.quiet {
            Some(LogLevel::Error)
        } else {
            None
        };

        Self {
            cwd: args.cwd.as_ref().map(|_| project_dir.to_path_buf()),
            log_level,
        }
    }
}

impl StaticBundleConfig {
    /// Load configuration from every source.
    /// Priority: flags > environment variables > config file > defaults
    ///
    /// The returned config always has `cwd` set to an absolute directory.
    pub fn load(args: &Cli) -> Result<Self> {
        let process_dir = std::env::current_dir()?;
        let project_dir = match &args.cwd {
            Some(dir) => process_dir.join(dir),
            None => process_dir,
        };

        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if let Some(path) = config_file(args.config.as_deref(), &project_dir)? {
            tracing::debug!(path = %path.display(), "loading config file");
            figment = figment.merge(Json::file(path));
        }

        figment = figment
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .lowercase(false)
                    .map(|key| env_key_to_field(key.as_str()).into()),
            )
            .merge(Serialized::defaults(FlagOverrides::from_cli(args, &project_dir)));

        let mut config: Self = figment.extract().map_err(|e| ConfigError::InvalidValue {
            field: "configuration".to_string(),
            value: e.to_string(),
            hint: format!("Check {} syntax and field types", CONFIG_FILE_NAME),
        })?;

        config.cwd = Some(match config.cwd.take() {
            Some(dir) => project_dir.join(dir),
            None => project_dir,
        });

        Ok(config)
    }
}

/// The config file to read, if any.
///
/// An explicit path must exist; the default file is optional.
fn config_file(explicit: Option<&Path>, project_dir: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(ConfigError::NotFound(path.to_path_buf()).into()),
        None => {
            let default_path = project_dir.join(CONFIG_FILE_NAME);
            Ok(default_path.is_file().then_some(default_path))
        }
    }
}

/// `ALLOW_OVERWRITE` → `allowOverwrite`
fn env_key_to_field(key: &str) -> String {
    let mut field = String::with_capacity(key.len());
    let mut upper_next = false;

    for c in key.chars() {
        if c == '_' {
            upper_next = !field.is_empty();
        } else if upper_next {
            field.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            field.push(c.to_ascii_lowercase());
        }
    }

    field
}

use crate::config::StaticBundleConfig;
use crate::error::{ConfigError, Result};

impl StaticBundleConfig {
    /// Validate configuration for logical consistency.
    ///
    /// Call after [`Self::resolve_entry_points`].
    pub fn validate(&self) -> Result<()> {
        if self.entry_points.is_empty() {
            return Err(ConfigError::MissingField {
                field: "entryPoints".to_string(),
                hint: format!(
                    "List at least one entry point inline or in {}",
                    self.entry_points_file.display()
                ),
            }
            .into());
        }

        if let Some(blank) = self.entry_points.iter().position(|e| e.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: format!("entryPoints[{}]", blank),
                value: "\"\"".to_string(),
                hint: "Entry points must be non-empty paths".to_string(),
            }
            .into());
        }

        if self.outdir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "outdir".to_string(),
                value: "\"\"".to_string(),
                hint: "Set an output directory such as \"dist\"".to_string(),
            }
            .into());
        }

        self.copy.validate().map_err(|e| ConfigError::InvalidValue {
            field: "copy".to_string(),
            value: e.to_string(),
            hint: "Each copy mapping needs at least one 'from' glob and one 'to' directory"
                .to_string(),
        })?;

        Ok(())
    }
}

//! Entry point manifest: a JSON array of paths kept next to the assets.

use std::path::Path;

use crate::config::StaticBundleConfig;
use crate::error::{ConfigError, Result};

/// Read the ordered entry list from a manifest file.
pub fn load_entry_manifest(path: &Path) -> std::result::Result<Vec<String>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::ManifestNotFound(path.to_path_buf()));
        }
        Err(e) => return Err(ConfigError::Io(e)),
    };

    serde_json::from_str(&content).map_err(|source| ConfigError::InvalidManifest {
        path: path.to_path_buf(),
        source,
    })
}

impl StaticBundleConfig {
    /// Fill `entry_points` from the manifest when none are configured inline.
    pub fn resolve_entry_points(&mut self, cwd: &Path) -> Result<()> {
        if !self.entry_points.is_empty() {
            return Ok(());
        }

        let manifest = cwd.join(&self.entry_points_file);
        self.entry_points = load_entry_manifest(&manifest)?;
        tracing::debug!(
            manifest = %manifest.display(),
            entries = self.entry_points.len(),
            "loaded entry point manifest"
        );

        Ok(())
    }
}

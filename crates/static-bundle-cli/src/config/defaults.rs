use std::path::PathBuf;

use static_bundle::{CopyAsset, CopyStep};

pub fn default_true() -> bool {
    true
}

pub fn default_outdir() -> PathBuf {
    PathBuf::from("dist")
}

pub fn default_entry_points_file() -> PathBuf {
    PathBuf::from("entryPoints.json")
}

/// Bootstrap's minified scripts and stylesheets.
pub fn default_copy() -> CopyStep {
    CopyStep::new()
        .asset(CopyAsset::new(
            ["./node_modules/bootstrap/dist/js/*.min.js"],
            ["./bootstrap/js"],
        ))
        .asset(CopyAsset::new(
            ["./node_modules/bootstrap/dist/css/*.min.css"],
            ["./bootstrap/css"],
        ))
}

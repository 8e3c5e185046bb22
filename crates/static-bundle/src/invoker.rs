//! The build invoker: one configuration in, one Rolldown run per entry,
//! files on disk.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use path_clean::PathClean;
use rolldown::{
    BundlerBuilder, BundlerOptions, InputItem, IsExternal, OutputFormat, Platform,
    RawMinifyOptions, SourceMapType,
};
use rolldown_common::{Output, TreeshakeOptions};
use rolldown_plugin::__inner::SharedPluginable;
use tracing::{debug, info, warn};

use crate::config::BuildConfig;
use crate::copy::CopyPlugin;
use crate::diagnostics::{ExtractedDiagnostic, extract_warning};
use crate::output::{BuildReport, write_bundle_to};
use crate::{Error, Result};

/// Imports that do not start with `.` or `/` are package imports.
const BARE_IMPORT_PATTERN: &str = "^[^./]";

/// Run the build described by `config`.
///
/// Every entry point is bundled on its own, so each output file is a
/// self-contained script holding its entry's whole module graph. Shared
/// modules are inlined into every entry that imports them. The copy plugin
/// rides along with the first run. Nothing is written until every run has
/// succeeded; the writer then checks the combined outputs for existing files
/// before touching disk.
///
/// # Errors
///
/// - [`Error::InvalidConfig`] before Rolldown runs (no entries, clashing
///   entry names, malformed copy mappings)
/// - [`Error::Bundler`] for anything Rolldown or the copy plugin reports,
///   such as a missing entry point or a copy pattern that matches nothing
/// - [`Error::OutputExists`], [`Error::InvalidOutputPath`] and
///   [`Error::WriteFailure`] from the writer
pub async fn build(config: BuildConfig) -> Result<BuildReport> {
    config.validate()?;

    let started = Instant::now();
    let cwd = config.resolved_cwd()?.clean();
    let outdir = config.resolved_outdir()?.clean();
    let items = input_items(&config.entry_points)?;

    info!(
        entries = items.len(),
        outdir = %outdir.display(),
        "starting build"
    );
    debug!(
        minify = config.minify,
        tree_shaking = config.tree_shaking,
        sourcemap = config.sourcemap,
        bundle = config.bundle,
        legal_comments = ?config.legal_comments,
        log_level = %config.log_level,
        "translated build options"
    );

    let copy_plugin = Arc::new(CopyPlugin::new(config.copy.clone(), cwd.clone()));
    let mut outputs = Vec::new();
    let mut warnings = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        let plugins: Vec<SharedPluginable> = if index == 0 {
            vec![copy_plugin.clone() as SharedPluginable]
        } else {
            Vec::new()
        };

        debug!(entry = %item.import, "bundling entry");
        let options = bundler_options(&config, item, &cwd, &outdir);
        let (assets, entry_warnings) = bundle_entry(options, plugins).await?;
        outputs.extend(assets);
        warnings.extend(entry_warnings);
    }

    for warning in &warnings {
        warn!(kind = %warning.kind, "{}", warning.message);
    }

    let copied = copy_plugin.take_copied();
    let files = write_bundle_to(&outputs, &outdir, config.allow_overwrite, &copied)?;

    for file in &files {
        info!(file = %file.filename, size = file.size, kind = %file.kind, "wrote");
    }
    info!(
        files = files.len(),
        warnings = warnings.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "build finished"
    );

    Ok(BuildReport { files, warnings })
}

/// One Rolldown run. Returns the generated outputs without writing them.
async fn bundle_entry(
    options: BundlerOptions,
    plugins: Vec<SharedPluginable>,
) -> Result<(Vec<Output>, Vec<ExtractedDiagnostic>)> {
    let mut bundler = BundlerBuilder::default()
        .with_options(options)
        .with_plugins(plugins)
        .build()
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let bundle = bundler
        .generate()
        .await
        .map_err(|e| Error::from_rolldown_batch(&e))?;

    let warnings = bundle.warnings.iter().map(|w| extract_warning(w)).collect();
    Ok((bundle.assets, warnings))
}

/// Translate a [`BuildConfig`] into Rolldown options for a single entry.
///
/// Output is a browser IIFE: a classic script that can be loaded with a
/// plain `<script src>`. Dynamic imports are inlined so the entry never
/// spills into extra chunks.
fn bundler_options(
    config: &BuildConfig,
    entry: InputItem,
    cwd: &Path,
    outdir: &Path,
) -> BundlerOptions {
    let external = (!config.bundle)
        .then(|| IsExternal::from(vec![BARE_IMPORT_PATTERN.to_string()]));

    BundlerOptions {
        input: Some(vec![entry]),
        cwd: Some(cwd.to_path_buf()),
        dir: Some(outdir.to_string_lossy().into_owned()),
        format: Some(OutputFormat::Iife),
        platform: Some(Platform::Browser),
        inline_dynamic_imports: Some(true),
        sourcemap: config.sourcemap.then_some(SourceMapType::File),
        minify: Some(RawMinifyOptions::from(config.minify)),
        treeshake: TreeshakeOptions::Boolean(config.tree_shaking),
        legal_comments: Some(config.legal_comments.to_rolldown()),
        external,
        ..Default::default()
    }
}

/// One input item per entry, named after the file stem so `src/app.js`
/// becomes `app.js` in the output directory.
fn input_items(entries: &[String]) -> Result<Vec<InputItem>> {
    let mut seen = HashSet::new();
    let mut items = Vec::with_capacity(entries.len());

    for entry in entries {
        let name = entry_name(entry).ok_or_else(|| {
            Error::InvalidConfig(format!("Entry point '{}' has no file name", entry))
        })?;
        if !seen.insert(name.clone()) {
            return Err(Error::InvalidConfig(format!(
                "Entry points share the output name '{}': rename one of them",
                name
            )));
        }
        items.push(InputItem {
            name: Some(name),
            import: entry_import(entry),
        });
    }

    Ok(items)
}

fn entry_name(entry: &str) -> Option<String> {
    Path::new(entry)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
}

/// Relative entries are resolved as paths, never as package names.
fn entry_import(entry: &str) -> String {
    let path = Path::new(entry);
    if path.is_absolute() || entry.starts_with("./") || entry.starts_with("../") {
        entry.to_string()
    } else {
        format!("./{}", entry)
    }
}

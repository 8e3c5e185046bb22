use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const BOOTSTRAP_JS: &str = "/*! Bootstrap */!function(){\"use strict\"}();";
const BOOTSTRAP_CSS: &str = "/*! Bootstrap */body{margin:0}";

/// A static/ directory laid out like the web application's asset folder.
fn create_static_dir() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();

    fs::create_dir_all(root.join("src")).expect("create src");
    fs::write(
        root.join("src/a.js"),
        "/*! LEGAL-MARKER */\nexport const a = () => 'a';\n",
    )
    .expect("write a.js");
    fs::write(root.join("src/b.js"), "export const b = () => 'b';\n").expect("write b.js");
    fs::write(root.join("entryPoints.json"), r#"["src/a.js", "src/b.js"]"#)
        .expect("write manifest");

    let js = root.join("node_modules/bootstrap/dist/js");
    let css = root.join("node_modules/bootstrap/dist/css");
    fs::create_dir_all(&js).expect("create bootstrap js");
    fs::create_dir_all(&css).expect("create bootstrap css");
    fs::write(js.join("bootstrap.min.js"), BOOTSTRAP_JS).expect("write bootstrap js");
    fs::write(css.join("bootstrap.min.css"), BOOTSTRAP_CSS).expect("write bootstrap css");

    dir
}

fn static_bundle(cwd: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("static-bundle");
    cmd.current_dir(cwd).arg("--no-color").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_arguments_runs_stock_build() {
    let project = create_static_dir();
    let dist = project.path().join("dist");

    static_bundle(project.path()).assert().success();

    for name in ["a.js", "a.js.map", "b.js", "b.js.map"] {
        assert!(dist.join(name).is_file(), "missing dist/{name}");
    }
    assert_eq!(
        fs::read_to_string(dist.join("bootstrap/js/bootstrap.min.js")).unwrap(),
        BOOTSTRAP_JS
    );
    assert_eq!(
        fs::read_to_string(dist.join("bootstrap/css/bootstrap.min.css")).unwrap(),
        BOOTSTRAP_CSS
    );
    assert!(!fs::read_to_string(dist.join("a.js")).unwrap().contains("LEGAL-MARKER"));
}

#[test]
fn test_rerun_overwrites_output() {
    let project = create_static_dir();

    static_bundle(project.path()).assert().success();
    static_bundle(project.path()).assert().success();
}

#[test]
fn test_cwd_flag() {
    let project = create_static_dir();
    let elsewhere = TempDir::new().expect("temp dir");

    static_bundle(elsewhere.path())
        .arg("--cwd")
        .arg(project.path())
        .assert()
        .success();

    assert!(project.path().join("dist/a.js").is_file());
}

#[test]
fn test_missing_entry_point_fails() {
    let project = create_static_dir();
    fs::write(
        project.path().join("entryPoints.json"),
        r#"["src/a.js", "src/missing.js"]"#,
    )
    .unwrap();

    static_bundle(project.path())
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("BUNDLER_ERROR").or(predicate::str::contains("missing.js")),
        );
}

#[test]
fn test_missing_manifest_fails() {
    let project = create_static_dir();
    fs::remove_file(project.path().join("entryPoints.json")).unwrap();

    static_bundle(project.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("entryPoints.json"));
}

#[test]
fn test_missing_bootstrap_fails() {
    let project = create_static_dir();
    fs::remove_dir_all(project.path().join("node_modules")).unwrap();

    static_bundle(project.path()).assert().failure();
}

#[test]
fn test_config_file_overrides_defaults() {
    let project = create_static_dir();
    fs::write(
        project.path().join("static-bundle.json"),
        r#"{ "entryPoints": ["src/b.js"], "outdir": "public", "sourcemap": false, "copy": [] }"#,
    )
    .unwrap();

    static_bundle(project.path()).assert().success();

    let public = project.path().join("public");
    assert!(public.join("b.js").is_file());
    assert!(!public.join("b.js.map").exists());
    assert!(!public.join("a.js").exists());
    assert!(!public.join("bootstrap").exists());
}

#[test]
fn test_env_overrides_config_file() {
    let project = create_static_dir();
    fs::write(
        project.path().join("static-bundle.json"),
        r#"{ "outdir": "public" }"#,
    )
    .unwrap();

    static_bundle(project.path())
        .env("STATIC_BUNDLE_OUTDIR", "out")
        .assert()
        .success();

    assert!(project.path().join("out/a.js").is_file());
    assert!(!project.path().join("public").exists());
}

#[test]
fn test_overwrite_disabled_fails_on_existing_output() {
    let project = create_static_dir();
    static_bundle(project.path()).assert().success();

    static_bundle(project.path())
        .env("STATIC_BUNDLE_ALLOW_OVERWRITE", "false")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OUTPUT_EXISTS"));
}

#[test]
fn test_piped_stderr_has_no_ansi_codes() {
    let project = create_static_dir();

    cargo_bin_cmd!("static-bundle")
        .current_dir(project.path())
        .arg("--verbose")
        .env_remove("RUST_LOG")
        .env_remove("FORCE_COLOR")
        .assert()
        .success()
        .stderr(predicate::str::contains("starting build"))
        .stderr(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_quiet_and_verbose_conflict() {
    let project = create_static_dir();

    static_bundle(project.path())
        .args(["--quiet", "--verbose"])
        .assert()
        .failure();
}

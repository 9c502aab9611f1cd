//! Integration tests for the `cleandroid` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android">

    <application android:label="Demo" />

</manifest>
"#;

const BUILD_SCRIPT: &str = r#"plugins {
    id("com.android.application")
}

android {
    namespace = "com.example.demo"
}

dependencies {
    implementation("androidx.core:core-ktx:1.12.0")
}
"#;

const CATALOG: &str = r#"[versions]
agp = "8.5.0"

[libraries]

[plugins]
android-application = { id = "com.android.application", version.ref = "agp" }
"#;

/// A sandbox holding an isolated home directory and an Android project.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("home")).unwrap();
        fs::create_dir_all(dir.path().join("work")).unwrap();
        Self { dir }
    }

    fn with_project(self, catalog: bool) -> Self {
        let root = self.project();
        fs::create_dir_all(root.join("app/src/main/java")).unwrap();
        fs::write(root.join("app/src/main/AndroidManifest.xml"), MANIFEST).unwrap();
        fs::write(root.join("app/build.gradle.kts"), BUILD_SCRIPT).unwrap();
        if catalog {
            fs::create_dir_all(root.join("gradle")).unwrap();
            fs::write(root.join("gradle/libs.versions.toml"), CATALOG).unwrap();
        }
        self
    }

    /// Working directory for the binary; the project lives in it.
    fn work(&self) -> std::path::PathBuf {
        self.dir.path().join("work")
    }

    fn project(&self) -> std::path::PathBuf {
        self.work().join("MyApp")
    }

    fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.project().join(rel)).unwrap()
    }

    /// The binary, isolated from the user's config and environment.
    fn cmd(&self) -> Command {
        let home = self.dir.path().join("home");
        let mut cmd = cargo::cargo_bin_cmd!("cleandroid");
        cmd.current_dir(self.work())
            .env("HOME", &home)
            .env("XDG_CONFIG_HOME", home.join(".config"))
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG")
            .env_remove("CLEANDROID_LOG")
            .env_remove("CLEANDROID_DEFAULTS__PERMISSION_CATEGORIES")
            .env_remove("CLEANDROID_DEFAULTS__LIBRARIES")
            .env_remove("CLEANDROID_DEFAULTS__DEPENDENCY_METHOD");
        cmd
    }
}

fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

fn layer_dir(root: &Path, layer: &str) -> std::path::PathBuf {
    root.join("app/src/main/java/com/example/demo").join(layer)
}

// ── help / version ──────────────────────────────────────────────────────────

#[test]
fn help_lists_commands() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("scaffold"))
        .stdout(predicate::str::contains("permissions"))
        .stdout(predicate::str::contains("deps"))
        .stdout(predicate::str::contains("setup"));
}

#[test]
fn version_flag() {
    Sandbox::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_category_is_a_usage_error() {
    Sandbox::new()
        .cmd()
        .args(["permissions", "--category", "expert"])
        .assert()
        .code(2);
}

// ── list ────────────────────────────────────────────────────────────────────

#[test]
fn list_permissions_as_json() {
    let output = Sandbox::new()
        .cmd()
        .args(["list", "permissions", "--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let categories = value.as_array().unwrap();
    assert_eq!(categories.len(), 4);
    assert_eq!(categories[0]["name"], "basic");
}

#[test]
fn list_dependencies_one_per_line() {
    Sandbox::new()
        .cmd()
        .args(["list", "deps", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glide\n"))
        .stdout(predicate::str::contains("room-compiler\n"));
}

// ── scaffold ────────────────────────────────────────────────────────────────

#[test]
fn scaffold_creates_layers_and_is_idempotent() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["scaffold", "MyApp", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created 11 folder(s) and 3 README(s)"));

    let root = sandbox.project();
    assert!(layer_dir(&root, "domain").join("usecase").is_dir());
    assert!(layer_dir(&root, "presentation").join("README.md").is_file());

    sandbox
        .cmd()
        .args(["scaffold", "MyApp", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already in place"));
}

#[test]
fn scaffold_dry_run_writes_nothing() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["scaffold", "MyApp", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Would create"));

    assert!(!layer_dir(&sandbox.project(), "domain").exists());
}

#[test]
fn scaffold_with_explicit_package() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["scaffold", "MyApp", "--package", "org.sample.shop", "--yes"])
        .assert()
        .success();

    assert!(
        sandbox
            .project()
            .join("app/src/main/java/org/sample/shop/data/repository")
            .is_dir()
    );
}

#[test]
fn scaffold_rejects_invalid_package() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["scaffold", "MyApp", "--package", "com.1bad", "--yes"])
        .assert()
        .code(2);
}

#[test]
fn missing_project_directory_is_not_found() {
    Sandbox::new()
        .cmd()
        .args(["scaffold", "Nowhere", "--yes"])
        .assert()
        .code(3);
}

// ── permissions ─────────────────────────────────────────────────────────────

#[test]
fn permissions_added_once() {
    let sandbox = Sandbox::new().with_project(false);
    let internet = r#"<uses-permission android:name="android.permission.INTERNET" />"#;

    for _ in 0..2 {
        sandbox
            .cmd()
            .args(["permissions", "MyApp", "--category", "basic,beginner", "--yes"])
            .assert()
            .success();
    }

    let manifest = sandbox.read("app/src/main/AndroidManifest.xml");
    assert_eq!(count(&manifest, internet), 1);
    assert_eq!(count(&manifest, "<uses-permission"), 7);
}

#[test]
fn declined_confirmation_changes_nothing() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["permissions", "MyApp", "--category", "basic"])
        .write_stdin("n\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cancelled"));

    assert_eq!(sandbox.read("app/src/main/AndroidManifest.xml"), MANIFEST);
}

#[test]
fn missing_manifest_is_not_found() {
    let sandbox = Sandbox::new().with_project(false);
    fs::remove_file(sandbox.project().join("app/src/main/AndroidManifest.xml")).unwrap();

    sandbox
        .cmd()
        .args(["permissions", "MyApp", "--category", "basic", "--yes"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("AndroidManifest.xml"));
}

#[test]
fn no_category_and_no_default_is_a_user_error() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["permissions", "MyApp", "--yes"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--category"));
}

#[test]
fn categories_from_environment() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .env("CLEANDROID_DEFAULTS__PERMISSION_CATEGORIES", "basic")
        .args(["permissions", "MyApp", "--yes"])
        .assert()
        .success();

    let manifest = sandbox.read("app/src/main/AndroidManifest.xml");
    assert_eq!(count(&manifest, "<uses-permission"), 4);
}

// ── deps ────────────────────────────────────────────────────────────────────

#[test]
fn deps_into_build_script_without_catalog() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["deps", "MyApp", "--lib", "retrofit,okhttp", "--yes"])
        .assert()
        .success();

    let script = sandbox.read("app/build.gradle.kts");
    assert_eq!(
        count(&script, r#"implementation("com.squareup.retrofit2:retrofit:2.9.0")"#),
        1
    );
    assert!(script.contains(r#"implementation("androidx.core:core-ktx:1.12.0")"#));
}

#[test]
fn deps_auto_prefers_catalog() {
    let sandbox = Sandbox::new().with_project(true);

    sandbox
        .cmd()
        .args(["deps", "MyApp", "--all", "--yes"])
        .assert()
        .success();

    assert_eq!(sandbox.read("app/build.gradle.kts"), BUILD_SCRIPT);
    let catalog = sandbox.read("gradle/libs.versions.toml");
    assert_eq!(count(&catalog, r#"retrofit = "2.9.0""#), 1);
}

#[test]
fn deps_without_dependencies_block_is_a_parse_error() {
    let sandbox = Sandbox::new().with_project(false);
    let script = "plugins {\n    id(\"com.android.application\")\n}\n";
    fs::write(sandbox.project().join("app/build.gradle.kts"), script).unwrap();

    sandbox
        .cmd()
        .args(["deps", "MyApp", "--method", "gradle", "--lib", "glide", "--yes"])
        .assert()
        .code(5);

    assert_eq!(sandbox.read("app/build.gradle.kts"), script);
}

#[test]
fn explicit_catalog_method_without_catalog_is_not_found() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["deps", "MyApp", "--method", "catalog", "--all", "--yes"])
        .assert()
        .code(3);
}

// ── setup ───────────────────────────────────────────────────────────────────

#[test]
fn setup_reports_json_summary() {
    let sandbox = Sandbox::new().with_project(false);

    let stdout = sandbox
        .cmd()
        .args([
            "--output-format",
            "json",
            "setup",
            "MyApp",
            "--category",
            "basic",
            "--lib",
            "glide",
            "--yes",
        ])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let summary: serde_json::Value = serde_json::from_slice(&stdout).unwrap();
    assert_eq!(summary["dry_run"], false);
    assert_eq!(summary["dependency_method"], "gradle_direct");
    assert_eq!(summary["permissions"]["stage"], "written");
    assert_eq!(summary["scaffold"]["written_readmes"].as_array().unwrap().len(), 3);
}

#[test]
fn confirmed_json_setup_keeps_prompt_off_stdout() {
    let sandbox = Sandbox::new().with_project(false);

    let assert = sandbox
        .cmd()
        .args([
            "--output-format",
            "json",
            "setup",
            "MyApp",
            "--category",
            "basic",
            "--lib",
            "glide",
        ])
        .write_stdin("y\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Continue? [Y/n]"));

    let summary: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(summary["permissions"]["stage"], "written");
    assert_eq!(count(&sandbox.read("app/build.gradle.kts"), "com.github.bumptech.glide:glide:"), 1);
}

#[test]
fn setup_dry_run_leaves_project_untouched() {
    let sandbox = Sandbox::new().with_project(true);

    sandbox
        .cmd()
        .args(["setup", "MyApp", "--category", "advanced", "--all", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Dry run"));

    assert_eq!(sandbox.read("app/src/main/AndroidManifest.xml"), MANIFEST);
    assert_eq!(sandbox.read("gradle/libs.versions.toml"), CATALOG);
    assert!(!layer_dir(&sandbox.project(), "data").exists());
}

#[test]
fn setup_with_skips_only_runs_remaining_steps() {
    let sandbox = Sandbox::new().with_project(false);

    sandbox
        .cmd()
        .args(["setup", "MyApp", "--skip-scaffold", "--skip-deps", "--category", "basic", "--yes"])
        .assert()
        .success();

    assert!(!layer_dir(&sandbox.project(), "domain").exists());
    assert_eq!(sandbox.read("app/build.gradle.kts"), BUILD_SCRIPT);
    assert!(sandbox.read("app/src/main/AndroidManifest.xml").contains("INTERNET"));
}

// ── config / init / completions ─────────────────────────────────────────────

#[test]
fn init_local_then_config_roundtrip() {
    let sandbox = Sandbox::new();

    sandbox.cmd().args(["init", "--local"]).assert().success();
    assert!(sandbox.work().join(".cleandroid.toml").is_file());

    sandbox
        .cmd()
        .args(["config", "set", "defaults.dependency_method", "catalog"])
        .assert()
        .success();

    sandbox
        .cmd()
        .args(["config", "get", "defaults.dependency_method"])
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog"));
}

#[test]
fn config_get_unknown_key_is_a_configuration_error() {
    Sandbox::new()
        .cmd()
        .args(["config", "get", "defaults.language"])
        .assert()
        .code(4);
}

#[test]
fn missing_explicit_config_file_is_a_configuration_error() {
    Sandbox::new()
        .cmd()
        .args(["--config", "absent.toml", "list"])
        .assert()
        .code(4);
}

#[test]
fn invalid_local_config_is_a_configuration_error() {
    let sandbox = Sandbox::new();
    fs::write(
        sandbox.work().join(".cleandroid.toml"),
        "[defaults]\nlibraries = [\"picasso\"]\n",
    )
    .unwrap();

    sandbox.cmd().arg("list").assert().code(4);
}

#[test]
fn bash_completions_mention_binary() {
    Sandbox::new()
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cleandroid"));
}

//! CLI integration tests for buildprofile.
//!
//! These tests run the binary against project directories on disk and check
//! the emitted profile, diagnostics, and exit codes.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const MANIFEST: &str = r#"[android]
applicationId = "com.example.pavo_efectivo"
compileSdk = 34
minSdk = 23
targetSdk = 34
sourceCompatibility = "VERSION_17"
targetCompatibility = "VERSION_17"

[provider]
path = "local.properties"
"#;

const LOCAL_PROPERTIES: &str = "flutter.sdk=/opt/flutter
flutter.versionCode=7
flutter.versionName=1.2.0
flutter.ndkVersion=26.1.10909125
";

/// Get the buildprofile binary command, isolated from the user's config.
fn buildprofile(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("buildprofile").unwrap();
    cmd.env("HOME", home).env_remove("BUILDPROFILE_MANIFEST");
    cmd
}

/// Create a project with the given manifest and the default provider snapshot.
fn project(manifest: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("build-profile.toml"), manifest).unwrap();
    fs::write(tmp.path().join("local.properties"), LOCAL_PROPERTIES).unwrap();
    tmp
}

// ============================================================================
// buildprofile resolve
// ============================================================================

#[test]
fn test_resolve_prints_json_profile() {
    let tmp = project(MANIFEST);

    let output = buildprofile(tmp.path())
        .args(["resolve", "--no-color"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let profile = &doc["profile"];
    assert_eq!(profile["applicationId"], "com.example.pavo_efectivo");
    assert_eq!(profile["namespace"], "com.example.pavo_efectivo");
    assert_eq!(profile["minSdk"], 23);
    assert_eq!(profile["targetSdk"], 34);
    assert_eq!(profile["compileSdk"], 34);
    assert_eq!(profile["versionCode"], 7);
    assert_eq!(profile["versionName"], "1.2.0");
    assert_eq!(profile["jvmTarget"], 17);
    assert_eq!(profile["variants"]["debug"]["debuggable"], true);
    assert_eq!(profile["variants"]["release"]["signing"]["name"], "debug");
}

#[test]
fn test_resolve_is_deterministic() {
    let tmp = project(MANIFEST);

    let run = || {
        buildprofile(tmp.path())
            .arg("resolve")
            .current_dir(tmp.path())
            .output()
            .unwrap()
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn test_resolve_warns_on_signing_fallback() {
    let tmp = project(MANIFEST);

    buildprofile(tmp.path())
        .args(["resolve", "--no-color"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("variant `release`"))
        .stderr(predicate::str::contains("falling back to `debug`"));
}

#[test]
fn test_resolve_dedicated_release_identity_has_no_warning() {
    let manifest = format!(
        "{MANIFEST}\n[signing-configs.release]\nstore-file = \"keys/upload.jks\"\nkey-alias = \"upload\"\n"
    );
    let tmp = project(&manifest);

    buildprofile(tmp.path())
        .args(["resolve", "--no-color", "--deny-fallback"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"signingSource\": \"dedicated\""))
        .stderr(predicate::str::contains("falling back").not());
}

#[test]
fn test_resolve_deny_fallback_fails() {
    let tmp = project(MANIFEST);

    buildprofile(tmp.path())
        .args(["resolve", "--no-color", "--deny-fallback"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("release"));
}

#[test]
fn test_resolve_invalid_sdk_ordering() {
    let tmp = project(&MANIFEST.replace("targetSdk = 34", "targetSdk = 21"));

    buildprofile(tmp.path())
        .args(["resolve", "--no-color"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("targetSdk must not be lower than minSdk"))
        .stderr(predicate::str::contains("help: consider:"));
}

#[test]
fn test_resolve_min_sdk_below_floor() {
    let tmp = project(&MANIFEST.replace("minSdk = 23", "minSdk = 16"));

    buildprofile(tmp.path())
        .args(["resolve", "--no-color"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("minSdk"))
        .stderr(predicate::str::contains("21"));
}

#[test]
fn test_resolve_writes_toml_output() {
    let tmp = project(MANIFEST);

    buildprofile(tmp.path())
        .args(["resolve", "--format", "toml", "--output", "out/profile.toml"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(tmp.path().join("out/profile.toml")).unwrap();
    assert!(written.contains("schemaVersion = 1"));
    assert!(written.contains("applicationId = \"com.example.pavo_efectivo\""));
}

#[test]
fn test_resolve_rejects_unknown_format() {
    let tmp = project(MANIFEST);

    buildprofile(tmp.path())
        .args(["resolve", "--format", "yaml"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid --format"));
}

#[test]
fn test_resolve_from_subdirectory() {
    let tmp = project(MANIFEST);
    let nested = tmp.path().join("android").join("app");
    fs::create_dir_all(&nested).unwrap();

    buildprofile(tmp.path())
        .arg("resolve")
        .current_dir(&nested)
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.pavo_efectivo"));
}

#[test]
fn test_resolve_with_manifest_path() {
    let tmp = project(MANIFEST);
    let elsewhere = TempDir::new().unwrap();

    buildprofile(tmp.path())
        .arg("resolve")
        .arg("--manifest-path")
        .arg(tmp.path().join("build-profile.toml"))
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"versionCode\": 7"));
}

#[test]
fn test_missing_manifest() {
    let tmp = TempDir::new().unwrap();

    buildprofile(tmp.path())
        .arg("resolve")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find `build-profile.toml`"));
}

#[test]
fn test_missing_provider_snapshot() {
    let tmp = project(MANIFEST);
    fs::remove_file(tmp.path().join("local.properties")).unwrap();

    buildprofile(tmp.path())
        .arg("resolve")
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("provider snapshot not found"));
}

#[test]
fn test_project_config_selects_format() {
    let tmp = project(MANIFEST);
    fs::create_dir_all(tmp.path().join(".buildprofile")).unwrap();
    fs::write(
        tmp.path().join(".buildprofile/config.toml"),
        "[emit]\nformat = \"toml\"\n",
    )
    .unwrap();

    buildprofile(tmp.path())
        .arg("resolve")
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("[profile]"));
}

// ============================================================================
// buildprofile check
// ============================================================================

#[test]
fn test_check_summarizes_profile() {
    let tmp = project(MANIFEST);

    buildprofile(tmp.path())
        .args(["check", "--no-color"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: com.example.pavo_efectivo 1.2.0 (7)"))
        .stdout(predicate::str::contains("release"))
        .stdout(predicate::str::contains("(fallback)"));
}

#[test]
fn test_check_rejects_mismatched_jvm_target() {
    let manifest = MANIFEST.replace(
        "targetCompatibility = \"VERSION_17\"",
        "targetCompatibility = \"VERSION_17\"\njvmTarget = \"11\"",
    );
    let tmp = project(&manifest);

    buildprofile(tmp.path())
        .args(["check", "--no-color"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("jvmTarget"));
}

// ============================================================================
// buildprofile table / completions
// ============================================================================

#[test]
fn test_table_lists_releases() {
    let tmp = TempDir::new().unwrap();

    buildprofile(tmp.path())
        .arg("table")
        .assert()
        .success()
        .stdout(predicate::str::contains("minSdk floor: 21"))
        .stdout(predicate::str::contains("Upside Down Cake"));
}

#[test]
fn test_table_json() {
    let tmp = TempDir::new().unwrap();

    let output = buildprofile(tmp.path())
        .args(["table", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["floor"], 21);
    assert_eq!(doc["runtimes"][0], 8);
}

#[test]
fn test_completions() {
    let tmp = TempDir::new().unwrap();

    buildprofile(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("buildprofile"));
}

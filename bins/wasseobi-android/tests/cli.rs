//! End-to-end tests for the `wasseobi-android` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// A Flutter project root with `android/app` and an optional `.env`.
fn flutter_project(env: Option<&str>) -> TempDir {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("android/app")).unwrap();
    if let Some(content) = env {
        fs::write(root.path().join(".env"), content).unwrap();
    }
    root
}

fn cli(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wasseobi-android").unwrap();
    cmd.current_dir(root.join("android"))
        .env_remove("WASSEOBI_ENV_FILE")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

const ENV: &str = "# signing\nRELEASE_STORE_PASSWORD=store-secret\nRELEASE_KEY_PASSWORD = key-secret \nGOOGLE_WEB_CLIENT_ID=42-abc.apps.googleusercontent.com\n";

#[test]
fn test_env_get_reads_flutter_root_env() {
    let root = flutter_project(Some(ENV));

    cli(root.path())
        .args(["env", "get", "RELEASE_KEY_PASSWORD"])
        .assert()
        .success()
        .stdout("key-secret\n");
}

#[test]
fn test_env_get_default_when_absent() {
    let root = flutter_project(None);

    cli(root.path())
        .args(["env", "get", "RELEASE_STORE_PASSWORD", "--default", "android"])
        .assert()
        .success()
        .stdout("android\n");
}

#[test]
fn test_env_get_missing_without_default() {
    let root = flutter_project(None);

    cli(root.path())
        .args(["env", "get", "GOOGLE_WEB_CLIENT_ID"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Key not set: GOOGLE_WEB_CLIENT_ID"));
}

#[test]
fn test_env_list_masks_values() {
    let root = flutter_project(Some(ENV));

    cli(root.path())
        .args(["env", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("RELEASE_STORE_PASSWORD"))
        .stdout(predicate::str::contains("3 keys"))
        .stdout(predicate::str::contains("store-secret").not());
}

#[test]
fn test_env_list_reveal_json() {
    let root = flutter_project(Some(ENV));

    let output = cli(root.path())
        .args(["env", "list", "--json", "--reveal"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(doc["entries"]["RELEASE_STORE_PASSWORD"], "store-secret");
    assert_eq!(doc["entries"]["RELEASE_KEY_PASSWORD"], "key-secret");
}

#[test]
fn test_env_list_without_file() {
    let root = flutter_project(None);

    cli(root.path())
        .args(["env", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("defaults will be used"));
}

#[test]
fn test_env_file_override() {
    let root = flutter_project(Some(ENV));
    let other = root.path().join("ci.env");
    fs::write(&other, "RELEASE_KEY_PASSWORD=from-ci\n").unwrap();

    cli(root.path())
        .arg("--env-file")
        .arg(&other)
        .args(["env", "get", "RELEASE_KEY_PASSWORD"])
        .assert()
        .success()
        .stdout("from-ci\n");
}

#[test]
fn test_properties_mask_passwords() {
    let root = flutter_project(Some(ENV));

    cli(root.path())
        .arg("properties")
        .assert()
        .success()
        .stdout(predicate::str::contains("-PwasseobiReleaseKeyAlias=release_key"))
        .stdout(predicate::str::contains("-PwasseobiReleaseStorePassword=********"))
        .stdout(predicate::str::contains(
            "-PwasseobiGoogleWebClientId=42-abc.apps.googleusercontent.com",
        ))
        .stdout(predicate::str::contains("store-secret").not())
        .stdout(predicate::str::contains("key-secret").not());
}

#[test]
fn test_config_json() {
    let root = flutter_project(Some(ENV));

    let output = cli(root.path()).args(["config", "--json"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(!stdout.contains("store-secret"));

    let doc: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(doc["application_id"], "com.wasseobi.app");
    assert_eq!(doc["ndk_version"], "27.0.12077973");
    assert_eq!(doc["signing"]["key_alias"], "release_key");
    assert_eq!(doc["signing"]["store_password"], "<redacted>");
    assert_eq!(doc["build_types"][0]["application_id_suffix"], ".debug");
}

#[test]
fn test_config_file_overrides_defaults() {
    let root = flutter_project(None);
    fs::write(
        root.path().join("android/.wasseobi-android.toml"),
        "[app]\nndk_version = \"28.1.13356709\"\n\n[signing]\nkey_alias = \"upload\"\n",
    )
    .unwrap();

    cli(root.path())
        .arg("properties")
        .assert()
        .success()
        .stdout(predicate::str::contains("-PwasseobiNdkVersion=28.1.13356709"))
        .stdout(predicate::str::contains("-PwasseobiReleaseKeyAlias=upload"));
}

#[test]
fn test_config_found_in_project_dir() {
    let root = flutter_project(None);
    fs::write(
        root.path().join("android/.wasseobi-android.toml"),
        "[signing]\nkey_alias = \"upload\"\n",
    )
    .unwrap();

    Command::cargo_bin("wasseobi-android")
        .unwrap()
        .current_dir(root.path())
        .env_remove("WASSEOBI_ENV_FILE")
        .env_remove("RUST_LOG")
        .args(["--no-color", "--project-dir", "android", "properties"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-PwasseobiReleaseKeyAlias=upload"));
}

#[test]
fn test_missing_explicit_config() {
    let root = flutter_project(None);

    cli(root.path())
        .args(["--config", "missing.toml", "properties"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_release_build_requires_keystore() {
    let root = flutter_project(Some(ENV));

    cli(root.path())
        .args(["build", "--configuration", "release"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("keystore not found"));
}

#[cfg(unix)]
#[test]
fn test_debug_build_runs_wrapper() {
    use std::os::unix::fs::PermissionsExt;

    let root = flutter_project(Some(ENV));
    let wrapper = root.path().join("android/gradlew");
    fs::write(
        &wrapper,
        "#!/bin/sh\n[ \"$1\" = assembleDebug ] || exit 9\n[ \"$ORG_GRADLE_PROJECT_wasseobiReleaseKeyAlias\" = release_key ] || exit 8\n",
    )
    .unwrap();
    fs::set_permissions(&wrapper, fs::Permissions::from_mode(0o755)).unwrap();

    cli(root.path())
        .args(["-q", "build"])
        .assert()
        .success();
}

#[test]
fn test_doctor_without_wrapper_fails() {
    let root = flutter_project(Some(ENV));

    let output = cli(root.path()).args(["doctor", "--json"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let doc: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let checks = doc["checks"].as_array().unwrap();
    let wrapper = checks.iter().find(|c| c["name"] == "gradle wrapper").unwrap();
    assert_eq!(wrapper["status"], "fail");
    let env = checks.iter().find(|c| c["name"] == "env file").unwrap();
    assert_eq!(env["status"], "pass");
}

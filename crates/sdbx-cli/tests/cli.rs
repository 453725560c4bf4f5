//! Integration tests for the sdbx binary.
//!
//! Everything here runs without a backend: the commands either fail
//! before any request goes out or never talk to the network at all.
//! Config and session lookups are isolated into a per-test home.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sdbx(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sdbx").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("config"));
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("quota"));
}

#[test]
fn test_tools_list_shows_builtin_layouts() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["tools", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dataprocess"))
        .stdout(predicate::str::contains("werthenbach"))
        .stdout(predicate::str::contains("alias of dataprocess"));
}

#[test]
fn test_tools_show_prints_columns() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["tools", "show", "werthenbach"])
        .assert()
        .success()
        .stdout(predicate::str::contains("35 columns"))
        .stdout(predicate::str::contains("Produktname"))
        .stdout(predicate::str::contains("WGK"));
}

#[test]
fn test_tools_show_unknown_tool_fails() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["tools", "show", "nosuch"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool 'nosuch'"))
        .stderr(predicate::str::contains("dataprocess"));
}

#[test]
fn test_upload_requires_login() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["upload", "dataprocess", "missing.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sdbx login"));
}

#[test]
fn test_upload_rejects_unknown_tool_before_anything_else() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["upload", "nosuch", "missing.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown tool 'nosuch'"));
}

#[test]
fn test_upload_send_without_recipients_fails_before_the_batch() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["upload", "dataprocess", "--send", "missing.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no recipients"))
        .stderr(predicate::str::contains("sdbx login").not());
}

#[test]
fn test_quota_requires_login() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["quota", "dataprocess"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sdbx login"));
}

#[test]
fn test_history_requires_login() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["history", "dataprocess"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("sdbx login"));
}

#[test]
fn test_history_rejects_unparseable_dates() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["history", "dataprocess", "--from", "gestern"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_config_show_defaults_without_file() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No config file found"))
        .stdout(predicate::str::contains("base_url"));
}

#[test]
fn test_config_init_get_set_roundtrip() {
    let home = TempDir::new().unwrap();

    sdbx(&home).args(["config", "init"]).assert().success();

    sdbx(&home)
        .args(["config", "get", "api.base_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://localhost:8000/api"));

    sdbx(&home)
        .args(["config", "set", "export.date_field", "erstellt_am"])
        .assert()
        .success();

    sdbx(&home)
        .args(["config", "get", "export.date_field"])
        .assert()
        .success()
        .stdout(predicate::str::contains("erstellt_am"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let home = TempDir::new().unwrap();

    sdbx(&home).args(["config", "init"]).assert().success();
    sdbx(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    sdbx(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn test_config_get_unknown_key_fails() {
    let home = TempDir::new().unwrap();
    sdbx(&home)
        .args(["config", "get", "api.no_such_key"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));
}

#[test]
fn test_config_override_path() {
    let home = TempDir::new().unwrap();
    let custom = home.path().join("custom.json");
    let custom = custom.to_str().unwrap();

    sdbx(&home)
        .args(["--config", custom, "config", "init"])
        .assert()
        .success();

    sdbx(&home)
        .args(["--config", custom, "config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("custom.json"))
        .stdout(predicate::str::contains("exists"));
}

#[test]
fn test_missing_config_override_fails() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nirgends.json");
    let missing = missing.to_str().unwrap();

    sdbx(&home)
        .args(["--config", missing, "quota", "dataprocess"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"))
        .stderr(predicate::str::contains("nirgends.json"))
        .stderr(predicate::str::contains("sdbx login").not());
}

//! CLI integration smoke tests.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

fn helmsman() -> Command {
    Command::cargo_bin("helmsman").expect("binary builds")
}

fn write_temp_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("helmsman-cli-test-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn help_lists_the_operator_surface() {
    helmsman()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("stop"))
        .stdout(predicate::str::contains("force-entry"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn version_prints_the_crate_version() {
    helmsman()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn check_config_accepts_a_valid_file() {
    let file = write_temp_config(
        "[engine]\napi_url = \"http://localhost:8080/api/v1\"\n\n[logging]\nlevel = \"info\"\nformat = \"pretty\"\n",
    );

    helmsman()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn check_config_rejects_a_malformed_url() {
    let file = write_temp_config("[engine]\napi_url = \"not a url\"\n");

    helmsman()
        .args(["check", "config", "--config"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("api_url"));
}

#[test]
fn check_connection_reports_an_unreachable_engine() {
    // Nothing listens on port 1.
    helmsman()
        .args([
            "check",
            "connection",
            "--config",
            "/nonexistent/helmsman.toml",
            "--api-url",
            "http://127.0.0.1:1/api/v1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot reach the trading engine"));
}

#[test]
fn status_renders_disconnected_for_an_unreachable_engine() {
    helmsman()
        .args([
            "status",
            "--config",
            "/nonexistent/helmsman.toml",
            "--api-url",
            "http://127.0.0.1:1/api/v1",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("disconnected"));
}

#[test]
fn force_exit_requires_a_trade_id() {
    helmsman().arg("force-exit").assert().failure();
}

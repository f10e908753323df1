//! Tests for configuration loading, validation, and credential layering.

use std::io::Write;

use tempfile::NamedTempFile;

use helmsman::app::config::Config;
use helmsman::engine::auth::{self, CredentialOverrides, Credentials};
use helmsman::error::{ConfigError, Error};

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("helmsman-config-test-")
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn full_file_parses_both_sections() {
    let file = write_temp_config(
        r#"
[engine]
api_url = "http://engine.internal:9090/api/v1"
username = "operator"
auto_connect = false
timeout_ms = 3000

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::load(file.path()).expect("load");
    assert_eq!(config.engine.api_url, "http://engine.internal:9090/api/v1");
    assert_eq!(config.engine.username, "operator");
    assert!(!config.engine.auto_connect);
    assert_eq!(config.engine.timeout_ms, 3000);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, "json");
}

#[test]
fn sparse_file_fills_every_field_with_defaults() {
    let file = write_temp_config("[engine]\nusername = \"operator\"\n");

    let config = Config::load(file.path()).expect("load");
    assert_eq!(config.engine.api_url, auth::DEFAULT_API_URL);
    assert_eq!(config.engine.username, "operator");
    assert!(config.engine.auto_connect);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn missing_file_falls_back_to_stock_defaults() {
    let config =
        Config::load_or_default("/nonexistent/helmsman.toml").expect("defaults apply");
    assert_eq!(config.engine.api_url, auth::DEFAULT_API_URL);
    assert_eq!(config.engine.username, auth::DEFAULT_USERNAME);
}

#[test]
fn missing_file_is_an_error_for_strict_load() {
    let result = Config::load("/nonexistent/helmsman.toml");
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}

#[test]
fn unparseable_file_is_rejected() {
    let file = write_temp_config("[engine\napi_url = ");
    let result = Config::load(file.path());
    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn malformed_api_url_is_rejected() {
    let file = write_temp_config("[engine]\napi_url = \"not a url\"\n");

    let result = Config::load(file.path());
    match result {
        Err(Error::Config(ConfigError::InvalidValue { field: "api_url", .. })) => {}
        other => panic!("expected invalid api_url, got {other:?}"),
    }
}

#[test]
fn zero_timeout_is_rejected() {
    let file = write_temp_config("[engine]\ntimeout_ms = 0\n");

    let result = Config::load(file.path());
    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "timeout_ms",
            ..
        })) => {}
        other => panic!("expected invalid timeout_ms, got {other:?}"),
    }
}

#[test]
fn env_password_overrides_the_file_value() {
    let file = write_temp_config("[engine]\npassword = \"from-file\"\n");

    std::env::set_var("ENGINE_PASSWORD", "from-env");
    let config = Config::load(file.path()).expect("load");
    std::env::remove_var("ENGINE_PASSWORD");

    assert_eq!(config.engine.password, "from-env");
}

#[test]
fn cli_override_beats_file_which_beats_default() {
    let file = write_temp_config(
        "[engine]\napi_url = \"http://file.example:8080/api/v1\"\nusername = \"from-file\"\n",
    );
    let config = Config::load(file.path()).expect("load");

    let overrides = CredentialOverrides {
        username: Some("from-cli".into()),
        ..CredentialOverrides::default()
    };
    let credentials = Credentials::resolve(&config.engine, &overrides);

    // Override wins for username, file wins for the URL, default fills the
    // untouched password layer.
    assert_eq!(credentials.username(), "from-cli");
    assert_eq!(credentials.base_url(), "http://file.example:8080/api/v1");
}

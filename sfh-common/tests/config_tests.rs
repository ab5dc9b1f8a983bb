//! Tests for TOML config loading and layered resolution

use sfh_common::config::{layered, load_toml_config};
use sfh_common::Error;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
fn test_load_explicit_config() {
    let file = write_config(
        r#"
host = "127.0.0.1"
port = 4000
database_url = "sqlite://hookups.db"
identity_service_uri = "http://users:3000"
monitoring_service_uri = "http://monitoring:3003"
"#,
    );

    let config = load_toml_config(Some(file.path())).expect("Config should load");

    assert_eq!(config.host.as_deref(), Some("127.0.0.1"));
    assert_eq!(config.port, Some(4000));
    assert_eq!(config.database_url.as_deref(), Some("sqlite://hookups.db"));
    assert_eq!(config.identity_service_uri.as_deref(), Some("http://users:3000"));
    assert_eq!(
        config.monitoring_service_uri.as_deref(),
        Some("http://monitoring:3003")
    );
}

#[test]
fn test_partial_config_leaves_other_keys_unset() {
    let file = write_config("port = 8080\n");

    let config = load_toml_config(Some(file.path())).expect("Config should load");

    assert_eq!(config.port, Some(8080));
    assert!(config.host.is_none());
    assert!(config.identity_service_uri.is_none());
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let result = load_toml_config(Some(&missing));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_unknown_key_is_rejected() {
    let file = write_config("mongo_uri = \"mongodb://localhost\"\n");

    let result = load_toml_config(Some(file.path()));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_wrong_type_is_rejected() {
    let file = write_config("port = \"eighty\"\n");

    assert!(load_toml_config(Some(file.path())).is_err());
}

#[test]
fn test_layered_prefers_command_line_or_environment() {
    assert_eq!(layered(Some(1), Some(2)), Some(1));
    assert_eq!(layered(None, Some(2)), Some(2));
    assert_eq!(layered::<u16>(None, None), None);
}

//! Integration-level unit tests for the SettingsEngine public API.
//!
//! These tests exercise the SettingsEngine through its public trait interface:
//! default loading, dot-path updates, persistence and reset.

use linkdeck::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use linkdeck::types::errors::SettingsError;
use linkdeck::types::settings::ClientSettings;
use serde_json::json;
use tempfile::TempDir;

/// Helper: create a SettingsEngine backed by a temp directory that lives for the
/// duration of the test (the caller holds the `TempDir` handle).
fn engine_in_temp(dir: &TempDir) -> SettingsEngine {
    let path = dir
        .path()
        .join("settings.json")
        .to_string_lossy()
        .to_string();
    SettingsEngine::new(Some(path))
}

#[test]
fn test_load_defaults_when_no_config_file_exists() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();

    // The API URL may be overridden by the environment; the rest is fixed.
    assert_eq!(settings.storage, ClientSettings::default().storage);
    assert_eq!(settings.logging.level, "info");
}

#[test]
fn test_set_value_persists_and_reloads() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.load().unwrap();

    engine
        .set_value("storage.database_path", json!("/tmp/linkdeck-test.db"))
        .unwrap();
    engine.set_value("logging.level", json!("debug")).unwrap();

    let mut reopened = engine_in_temp(&dir);
    let settings = reopened.load().unwrap();
    assert_eq!(
        settings.storage.database_path.as_deref(),
        Some("/tmp/linkdeck-test.db")
    );
    assert_eq!(settings.logging.level, "debug");
}

#[test]
fn test_set_value_rejects_unknown_key() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    for key in ["", "api.nope", "nope.base_url", "logging"] {
        let err = engine.set_value(key, json!("x")).unwrap_err();
        if key == "logging" {
            assert!(matches!(err, SettingsError::InvalidValue(_)), "{:?}", err);
        } else {
            assert!(matches!(err, SettingsError::InvalidKey(_)), "{}: {:?}", key, err);
        }
    }
}

#[test]
fn test_set_value_rejects_wrong_type() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);

    let err = engine.set_value("api.base_url", json!(42)).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidValue(_)));
    assert_eq!(engine.get_settings().api, ClientSettings::default().api);
}

#[test]
fn test_malformed_file_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("settings.json"), "{ not json").unwrap();
    let mut engine = engine_in_temp(&dir);

    assert!(matches!(
        engine.load(),
        Err(SettingsError::SerializationError(_))
    ));
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("settings.json"),
        r#"{"logging": {"level": "trace"}}"#,
    )
    .unwrap();
    let mut engine = engine_in_temp(&dir);

    let settings = engine.load().unwrap();
    assert_eq!(settings.logging.level, "trace");
    assert_eq!(settings.storage.database_path, None);
}

#[test]
fn test_reset_restores_defaults() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    engine.set_value("logging.level", json!("warn")).unwrap();

    engine.reset().unwrap();

    assert_eq!(engine.get_settings(), &ClientSettings::default());
    let on_disk = std::fs::read_to_string(engine.get_config_path()).unwrap();
    let parsed: ClientSettings = serde_json::from_str(&on_disk).unwrap();
    assert_eq!(parsed, ClientSettings::default());
}

#[test]
fn test_database_path_uses_configured_value() {
    let dir = TempDir::new().unwrap();
    let mut engine = engine_in_temp(&dir);
    let target = dir.path().join("custom.db");
    engine
        .set_value("storage.database_path", json!(target.to_string_lossy()))
        .unwrap();

    assert_eq!(engine.database_path(), target);
}

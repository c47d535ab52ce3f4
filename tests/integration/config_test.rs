use hostsnap::core::telemetry::{ExecutionMode, FieldKey, ProbeRegistry};
use hostsnap::Config;
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.probe_timeout(), Duration::from_secs(5));
    assert_eq!(config.execution, ExecutionMode::Concurrent);
    assert!(config.disabled_fields.is_empty());
    assert!(config.storage_mount_point.is_none());
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("nested").join("config.json");

    let config = Config {
        probe_timeout_ms: 750,
        execution: ExecutionMode::Sequential,
        disabled_fields: vec![FieldKey::Displays, FieldKey::Gpus],
        storage_mount_point: Some("/data".to_string()),
    };
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.storage_mount_point(), "/data");
}

#[test]
fn test_missing_file_yields_default() {
    let temp_dir = TempDir::new().unwrap();
    let loaded = Config::load_from(&temp_dir.path().join("absent.json")).unwrap();
    assert_eq!(loaded, Config::default());
}

#[test]
fn test_empty_and_corrupt_files_yield_default() {
    let temp_dir = TempDir::new().unwrap();

    let empty = temp_dir.path().join("empty.json");
    fs::write(&empty, "   \n").unwrap();
    assert_eq!(Config::load_from(&empty).unwrap(), Config::default());

    let corrupt = temp_dir.path().join("corrupt.json");
    fs::write(&corrupt, "{ \"probe_timeout_ms\": ").unwrap();
    assert_eq!(Config::load_from(&corrupt).unwrap(), Config::default());
}

#[test]
fn test_partial_file_fills_in_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("config.json");
    fs::write(&path, r#"{ "disabled_fields": ["power", "displays"] }"#).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    assert_eq!(loaded.probe_timeout_ms, 5000);
    assert!(loaded.is_disabled(FieldKey::Power));
    assert!(loaded.is_disabled(FieldKey::Displays));
    assert!(!loaded.is_disabled(FieldKey::Cpu));
}

#[test]
fn test_disabled_fields_leave_standard_registry() {
    let config = Config {
        disabled_fields: vec![FieldKey::Power, FieldKey::Gpus],
        ..Default::default()
    };
    let registry = ProbeRegistry::standard(&config);

    assert_eq!(registry.len(), FieldKey::ALL.len() - 2);
    assert!(!registry.contains(FieldKey::Power));
    assert!(!registry.contains(FieldKey::Gpus));
    assert!(registry.contains(FieldKey::Architecture));
}

#[test]
fn test_aggregator_config_follows_config() {
    let config = Config {
        probe_timeout_ms: 1200,
        execution: ExecutionMode::Sequential,
        ..Default::default()
    };
    let aggregator_config = config.aggregator_config();
    assert_eq!(aggregator_config.probe_timeout, Duration::from_millis(1200));
    assert_eq!(aggregator_config.execution, ExecutionMode::Sequential);
}

use std::io::Write;
use std::path::PathBuf;

use shelflife_core::config::ShelfConfig;

#[test]
fn default_config_is_valid() {
    let config = ShelfConfig::default();
    config.validate().unwrap();

    assert_eq!(config.detection.z_threshold, 2.0);
    assert_eq!(config.detection.absolute_threshold_mb, None);
    assert_eq!(config.storage.retention_days, 90);
    assert_eq!(config.storage.read_pool_size, 4);
}

#[test]
fn partial_toml_fills_in_defaults() {
    let config = ShelfConfig::from_toml(
        r#"
        [detection]
        z_threshold = 3.0
        absolute_threshold_mb = 1000.0
        "#,
    )
    .unwrap();

    assert_eq!(config.detection.z_threshold, 3.0);
    assert_eq!(config.detection.absolute_threshold_mb, Some(1000.0));
    // Untouched sections keep their defaults.
    assert_eq!(config.storage.retention_days, 90);
    assert_eq!(config.vault.key_path, PathBuf::from(".shelflife_master.key"));
}

#[test]
fn zero_z_threshold_is_rejected() {
    let err = ShelfConfig::from_toml("[detection]\nz_threshold = 0.0\n").unwrap_err();
    assert!(err.to_string().contains("z_threshold"));
}

#[test]
fn negative_absolute_threshold_is_rejected() {
    let err =
        ShelfConfig::from_toml("[detection]\nabsolute_threshold_mb = -5.0\n").unwrap_err();
    assert!(err.to_string().contains("absolute_threshold_mb"));
}

#[test]
fn zero_retention_is_rejected() {
    let err = ShelfConfig::from_toml("[storage]\nretention_days = 0\n").unwrap_err();
    assert!(err.to_string().contains("retention_days"));
}

#[test]
fn garbage_toml_is_a_validation_error() {
    let err = ShelfConfig::from_toml("not [ valid").unwrap_err();
    assert!(err.to_string().contains("config parse error"));
}

#[test]
fn loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelflife.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[storage]\nretention_days = 30").unwrap();

    let config = ShelfConfig::from_file(&path).unwrap();
    assert_eq!(config.storage.retention_days, 30);
}

#[test]
fn missing_file_is_an_error() {
    let err = ShelfConfig::from_file(std::path::Path::new("/nonexistent/shelflife.toml"))
        .unwrap_err();
    assert!(err.to_string().contains("cannot read config"));
}

//! Tests for the configuration module.
//!
//! This module contains tests for configuration loading, validation, and usage.

use crate::config::{
    protocol::ProtocolConfig, store::StoreConfig, AdLocatorConfig, ConfigLoader, LogConfig,
    Validate,
};
use crate::error::config::ConfigError;
use crate::tests::TestFixture;
use std::path::{Path, PathBuf};

/// Test that default configuration can be created and is valid.
#[test]
fn test_default_config_is_valid() {
    let config = AdLocatorConfig::default();
    assert!(config.validate().is_ok());
    assert!(config.store.data_file.is_none());
}

/// Test that configuration validation catches invalid values.
#[test]
fn test_config_validation() {
    let mut config = AdLocatorConfig::default();

    config.store.max_input_bytes = 0;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::ValueOutOfRange { .. })
    ));

    config.store.max_input_bytes = 1024;
    config.protocol.max_line_bytes = 0;
    assert!(config.validate().is_err());

    config.protocol.max_line_bytes = 1024;
    config.log.level = "verbose".to_string();
    assert!(config.validate().is_err());

    config.log.level = "debug".to_string();
    assert!(config.validate().is_ok());
}

/// Test that validation fails for each section independently.
#[test]
fn test_specific_validation_rules() {
    let store = StoreConfig {
        data_file: Some(PathBuf::new()),
        ..StoreConfig::default()
    };
    assert!(store.validate().is_err());

    let protocol = ProtocolConfig { max_line_bytes: 0 };
    assert!(protocol.validate().is_err());

    let log = LogConfig {
        level: String::new(),
        ..LogConfig::default()
    };
    assert!(log.validate().is_err());
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_file_test.toml",
            r#"
    [store]
    data_file = "/srv/ads/platforms.txt"
    max_input_bytes = 2048

    [log]
    level = "debug"
    "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_FILE");
    let config = loader.load().unwrap();

    assert_eq!(
        config.store.data_file.as_deref(),
        Some(Path::new("/srv/ads/platforms.txt"))
    );
    assert_eq!(config.store.max_input_bytes, 2048);
    assert_eq!(config.log.level, "debug");

    // Other values should be defaults
    assert_eq!(
        config.protocol.max_line_bytes,
        ProtocolConfig::default().max_line_bytes
    );
    assert!(!config.log.json);
}

/// Test loading configuration with environment variable overrides.
#[test]
fn test_env_var_override() {
    let mut fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "config_env_test.toml",
            r#"
    [store]
    max_input_bytes = 2048
    "#,
        )
        .unwrap();

    fixture.set_env("TEST_ENV__STORE__MAX_INPUT_BYTES", "4096");
    fixture.set_env("TEST_ENV__LOG__LEVEL", "warn");

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ENV");
    let config = loader.load().unwrap();

    assert_eq!(config.store.max_input_bytes, 4096);
    assert_eq!(config.log.level, "warn");
}

/// Test loading without a file uses defaults.
#[test]
fn test_load_without_file() {
    let loader = ConfigLoader::new(None::<&Path>, "TEST_NO_FILE");
    let config = loader.load().unwrap();
    assert_eq!(config.log.level, LogConfig::default().level);
}

/// Test that a missing configuration file is reported as such.
#[test]
fn test_missing_config_file() {
    let fixture = TestFixture::new().unwrap();
    let path = fixture.temp_dir.path().join("absent.toml");

    let loader = ConfigLoader::new(Some(&path), "TEST_MISSING");
    assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(p)) if p == path));
}

/// Test that loading an invalid configuration file returns an error.
#[test]
fn test_load_invalid_config() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file(
            "invalid.toml",
            r#"
    [store
    data_file = nowhere"
    "#,
        )
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_INVALID");
    assert!(loader.load().is_err());
}

/// Test that a file with values failing validation is rejected.
#[test]
fn test_load_rejects_invalid_values() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture
        .create_file("zero.toml", "[protocol]\nmax_line_bytes = 0\n")
        .unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_ZERO");
    assert!(matches!(
        loader.load(),
        Err(ConfigError::ValueOutOfRange { .. })
    ));
}

/// Test that unsupported extensions are rejected.
#[test]
fn test_unsupported_extension() {
    let fixture = TestFixture::new().unwrap();
    let config_path = fixture.create_file("settings.ini", "x = 1").unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_EXT");
    assert!(matches!(loader.load(), Err(ConfigError::ParseError(_))));
}

/// Test that the generated TOML can be loaded back.
#[test]
fn test_default_config_round_trips_through_toml() {
    let fixture = TestFixture::new().unwrap();
    let rendered = toml::to_string_pretty(&AdLocatorConfig::default()).unwrap();
    let config_path = fixture.create_file("generated.toml", rendered).unwrap();

    let loader = ConfigLoader::new(Some(&config_path), "TEST_GENERATED");
    let config = loader.load().unwrap();
    assert_eq!(
        config.store.max_input_bytes,
        StoreConfig::default().max_input_bytes
    );
}

/// Test that the shipped configuration file is found and matches the defaults.
#[test]
fn test_shipped_default_config() {
    // cargo runs tests from the package root
    let path = crate::config::default_config_path().unwrap();
    assert!(path.ends_with("config/default.toml"));

    let config = ConfigLoader::new(Some(&path), "TEST_SHIPPED").load().unwrap();
    assert_eq!(config.store.max_input_bytes, StoreConfig::default().max_input_bytes);
    assert_eq!(config.protocol.max_line_bytes, ProtocolConfig::default().max_line_bytes);
    assert_eq!(config.log.level, LogConfig::default().level);
}

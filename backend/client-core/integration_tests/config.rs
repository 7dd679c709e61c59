use client_core::config::ClientConfig;
use client_core::error::config::ConfigError;

use tempfile::TempDir;

#[test]
fn given_missing_file_when_loading_then_defaults() {
    let dir = TempDir::new().unwrap();

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config, ClientConfig::default());
}

/// **VALUE**: Verifies a saved config loads back unchanged.
#[test]
fn given_saved_config_when_loading_then_values_match() {
    let dir = TempDir::new().unwrap();
    let mut config = ClientConfig::default();
    config.api.base_url = "https://forum.example.com".to_string();
    config.session.poll_interval_secs = 1;

    config.save(dir.path()).unwrap();
    let loaded = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(loaded, config);
    assert!(!dir.path().join("config.json.tmp").exists());
}

/// **VALUE**: Verifies partial files are completed with defaults.
///
/// **WHY THIS MATTERS**: Users usually only set the base URL by hand.
#[test]
fn given_partial_file_when_loading_then_missing_fields_defaulted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"api": {"base_url": "https://forum.example.com"}}"#,
    )
    .unwrap();

    let config = ClientConfig::load(dir.path()).unwrap();

    assert_eq!(config.api.base_url, "https://forum.example.com");
    assert_eq!(config.api.timeout_secs, 30);
    assert_eq!(config.session.validity_window_secs, 3600);
}

#[test]
fn given_corrupted_file_when_loading_then_parse_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.json"), "{").unwrap();

    assert!(matches!(
        ClientConfig::load(dir.path()),
        Err(ConfigError::ParseError { .. })
    ));
}

/// **VALUE**: Verifies invalid values are refused both ways.
///
/// **BUG THIS CATCHES**: Would catch `save` writing a config `load` rejects.
#[test]
fn given_invalid_values_when_loading_or_saving_then_validation_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.json"),
        r#"{"session": {"poll_interval_secs": 0}}"#,
    )
    .unwrap();

    assert!(matches!(
        ClientConfig::load(dir.path()),
        Err(ConfigError::ValidationError { .. })
    ));

    let mut config = ClientConfig::default();
    config.api.base_url = "localhost".to_string();
    let save_dir = TempDir::new().unwrap();
    assert!(matches!(
        config.save(save_dir.path()),
        Err(ConfigError::ValidationError { .. })
    ));
    assert!(!save_dir.path().join("config.json").exists());
}

// Unit tests for config defaults and validation

use crate::config::ClientConfig;
use crate::error::config::ConfigError;

use std::time::Duration;

#[test]
fn given_defaults_when_validating_then_ok() {
    let config = ClientConfig::default();

    assert!(config.validate().is_ok());
    assert_eq!(config.api.base_url, crate::DEFAULT_API_BASE_URL);
    assert_eq!(config.api.timeout(), Duration::from_secs(30));
}

/// **VALUE**: Verifies the session section maps onto tracker settings.
///
/// **BUG THIS CATCHES**: Would catch seconds being passed through as milliseconds.
#[test]
fn given_session_config_when_building_settings_then_durations_match() {
    let mut config = ClientConfig::default();
    config.session.validity_window_secs = 120;
    config.session.poll_interval_secs = 2;
    config.session.storage_key = "custom".to_string();

    let settings = config.session_settings();

    assert_eq!(settings.validity_window, Duration::from_secs(120));
    assert_eq!(settings.poll_interval, Duration::from_secs(2));
    assert_eq!(settings.storage_key, "custom");
}

/// **VALUE**: Verifies each invalid value is rejected.
///
/// **WHY THIS MATTERS**: A zero poll interval would panic inside `tokio::time::interval`.
///
/// **BUG THIS CATCHES**: Would catch a removed guard clause.
#[test]
fn given_invalid_values_when_validating_then_validation_error() {
    let cases: [fn(&mut ClientConfig); 8] = [
        |c| c.version = 0,
        |c| c.version = 2,
        |c| c.api.base_url = String::new(),
        |c| c.api.base_url = "ftp://example.com".to_string(),
        |c| c.api.timeout_secs = 0,
        |c| c.session.storage_key = String::new(),
        |c| c.session.validity_window_secs = 0,
        |c| c.session.poll_interval_secs = 0,
    ];

    for mutate in cases {
        let mut config = ClientConfig::default();
        mutate(&mut config);

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}

#[test]
fn given_override_when_applying_base_url_then_replaced_and_trimmed() {
    let mut config = ClientConfig::default();

    config
        .apply_base_url_override(Some(" https://forum.example.com ".to_string()))
        .unwrap();
    assert_eq!(config.api.base_url, "https://forum.example.com");

    config.apply_base_url_override(Some("   ".to_string())).unwrap();
    config.apply_base_url_override(None).unwrap();
    assert_eq!(config.api.base_url, "https://forum.example.com");

    assert!(
        config
            .apply_base_url_override(Some("localhost".to_string()))
            .is_err()
    );
}

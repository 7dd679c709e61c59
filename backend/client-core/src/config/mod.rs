use crate::error::config::ConfigError;
use crate::session::SessionSettings;

use common::ErrorLocation;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;
const APP_DIR_NAME: &str = "shibespace";

/// Environment variable overriding [`ApiConfig::base_url`].
pub const API_BASE_URL_ENV: &str = "SHIBESPACE_API_BASE_URL";

// ============================================
// CONFIG STRUCTS
// ============================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_retry_max_elapsed_ms")]
    pub retry_max_elapsed_ms: u64,
    #[serde(default = "default_retry_initial_interval_ms")]
    pub retry_initial_interval_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            retry_max_elapsed_ms: default_retry_max_elapsed_ms(),
            retry_initial_interval_ms: default_retry_initial_interval_ms(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn retry_max_elapsed(&self) -> Duration {
        Duration::from_millis(self.retry_max_elapsed_ms)
    }

    pub fn retry_initial_interval(&self) -> Duration {
        Duration::from_millis(self.retry_initial_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_validity_window_secs")]
    pub validity_window_secs: u64,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            validity_window_secs: default_validity_window_secs(),
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

impl From<&SessionConfig> for SessionSettings {
    fn from(config: &SessionConfig) -> Self {
        SessionSettings {
            storage_key: config.storage_key.clone(),
            validity_window: Duration::from_secs(config.validity_window_secs),
            poll_interval: Duration::from_secs(config.poll_interval_secs),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            api: ApiConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_base_url() -> String {
    crate::DEFAULT_API_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_retry_max_elapsed_ms() -> u64 {
    2_000
}
fn default_retry_initial_interval_ms() -> u64 {
    100
}
fn default_storage_key() -> String {
    crate::session::SESSION_STORAGE_KEY.to_string()
}
fn default_validity_window_secs() -> u64 {
    crate::session::DEFAULT_VALIDITY_WINDOW.as_secs()
}
fn default_poll_interval_secs() -> u64 {
    crate::session::DEFAULT_POLL_INTERVAL.as_secs()
}

/// `{config_dir}/shibespace`, e.g. `~/.config/shibespace` on Linux.
#[track_caller]
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
        })
}

/// `{data_dir}/shibespace`, holding local storage and logs.
#[track_caller]
pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
        })
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ClientConfig {
    /// Load config from {config_dir}/config.json.
    ///
    /// # Returns
    ///
    /// Returns `Ok(ClientConfig)` if loaded successfully or defaults if file missing.
    /// Returns `Err(ConfigError)` if file exists but is corrupted/invalid.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: ClientConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to {config_dir}/config.json using atomic write.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if validation, directory creation,
    /// serialization, write or rename fails.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{}.tmp", CONFIG_FILE_NAME));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::from(Location::caller()),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: temp_path.clone(),
            source: e,
        })?;

        // Atomic rename (POSIX guarantees atomicity)
        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::from(Location::caller()),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    /// Apply `SHIBESPACE_API_BASE_URL` from `.env` or the process environment.
    ///
    /// A missing `.env` is not an error. The result is validated again.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        match dotenvy::dotenv() {
            Ok(path) => debug!("Loaded .env from: {}", path.display()),
            Err(e) if e.not_found() => debug!("No .env file found"),
            Err(e) => warn!("Failed to parse .env, ignoring it: {}", e),
        }

        self.apply_base_url_override(std::env::var(API_BASE_URL_ENV).ok())
    }

    /// Replace the base URL when `value` is set and non-blank.
    pub fn apply_base_url_override(&mut self, value: Option<String>) -> Result<(), ConfigError> {
        if let Some(url) = value.filter(|v| !v.trim().is_empty()) {
            info!("API base URL overridden by {}: {}", API_BASE_URL_ENV, url);
            self.api.base_url = url.trim().to_string();
            self.validate()?;
        }
        Ok(())
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings::from(&self.session)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::validation(format!(
                "Invalid version: {} (expected 1-{})",
                self.version, CONFIG_VERSION
            )));
        }

        let url = &self.api.base_url;
        if url.is_empty() {
            return Err(ConfigError::validation("api.base_url cannot be empty string"));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::validation(format!("Invalid URL format: {}", url)));
        }

        if self.api.timeout_secs == 0 {
            return Err(ConfigError::validation("api.timeout_secs must be non-zero"));
        }

        if self.session.storage_key.is_empty() {
            return Err(ConfigError::validation("session.storage_key cannot be empty"));
        }

        if self.session.validity_window_secs == 0 {
            return Err(ConfigError::validation(
                "session.validity_window_secs must be non-zero",
            ));
        }

        if self.session.poll_interval_secs == 0 {
            return Err(ConfigError::validation(
                "session.poll_interval_secs must be non-zero",
            ));
        }

        Ok(())
    }
}

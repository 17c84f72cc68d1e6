//! Configuration management for the API tester.
//!
//! This module provides configuration loading, validation, and access through a singleton pattern.
//! Configuration is read from the workspace settings under the `apiTester.client` key and merged
//! with defaults.

pub mod schema;

pub use schema::{ApiTesterConfig, ConfigError, Framework};

use once_cell::sync::Lazy;
use serde_json::Value;
use std::sync::RwLock;

/// Settings key holding the tool configuration object.
pub const SETTINGS_KEY: &str = "apiTester.client";

/// Global configuration instance.
///
/// This is lazily initialized on first access and can be updated when settings change.
static CONFIG: Lazy<RwLock<ApiTesterConfig>> =
    Lazy::new(|| RwLock::new(ApiTesterConfig::default()));

/// Loads configuration from a settings object.
///
/// Reads the `apiTester.client` entry, merges it with defaults, validates the
/// result and publishes it as the global configuration. A settings entry that
/// fails to deserialize is logged and ignored.
///
/// # Example
///
/// ```no_run
/// use api_tester::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "apiTester.client": {
///         "timeout": 5000
///     }
/// });
///
/// let config = load_config(Some(&settings)).unwrap();
/// assert_eq!(config.timeout, 5000);
/// ```
pub fn load_config(settings_json: Option<&Value>) -> Result<ApiTesterConfig, ConfigError> {
    let mut config = ApiTesterConfig::default();

    if let Some(client_settings) = settings_json.and_then(|s| s.get(SETTINGS_KEY)) {
        match serde_json::from_value::<ApiTesterConfig>(client_settings.clone()) {
            Ok(user_config) => {
                config = config.merge(&user_config);
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY,
                    e
                );
            }
        }
    }

    config.validate()?;

    if let Ok(mut global_config) = CONFIG.write() {
        *global_config = config.clone();
    }

    Ok(config)
}

/// Gets the current global configuration.
///
/// Returns the defaults if no configuration has been loaded yet.
pub fn get_config() -> ApiTesterConfig {
    CONFIG
        .read()
        .map(|c| c.clone())
        .unwrap_or_else(|_| ApiTesterConfig::default())
}

/// Updates the global configuration in place.
///
/// Reverts to defaults if the update leaves the configuration invalid.
pub fn update_config<F>(updater: F)
where
    F: FnOnce(&mut ApiTesterConfig),
{
    if let Ok(mut config) = CONFIG.write() {
        updater(&mut config);

        if let Err(e) = config.validate() {
            log::warn!("Configuration validation failed after update: {}", e);
            *config = ApiTesterConfig::default();
        }
    }
}

/// Resets the configuration to defaults.
pub fn reset_config() {
    if let Ok(mut config) = CONFIG.write() {
        *config = ApiTesterConfig::default();
    }
}

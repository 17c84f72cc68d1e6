//! Configuration schema for the API tester.
//!
//! This module defines the configuration structure and validation logic for all
//! user-configurable settings. Settings live in the workspace settings file under
//! the `apiTester.client` key.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Route scanner frameworks that can be enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    /// NestJS controllers (`@Controller` / `@Get` decorators).
    Nest,
    /// Next.js App Router handlers (`app/api/**/route.ts`).
    Next,
}

/// Main configuration structure.
///
/// Missing settings fall back to defaults; invalid combinations are rejected by
/// [`ApiTesterConfig::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTesterConfig {
    /// Request timeout in milliseconds.
    ///
    /// Must be greater than 0. Defaults to 10000ms.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// File-name suffix identifying controller files.
    ///
    /// Defaults to `.controller.ts`. Must not be empty.
    #[serde(default = "default_controller_suffix")]
    pub controller_suffix: String,

    /// Directory names pruned from the workspace walk.
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Frameworks whose routes are scanned. Defaults to NestJS only.
    #[serde(default = "default_frameworks")]
    pub frameworks: Vec<Framework>,

    /// Base URL suggested when prompting for one.
    #[serde(default = "default_base_url")]
    pub default_base_url: String,

    /// Headers sent with every request unless overridden by auth or
    /// explicitly supplied headers.
    #[serde(default)]
    pub default_headers: HashMap<String, String>,
}

/// Errors produced when validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A setting holds a value outside its allowed range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// camelCase setting name
        field: &'static str,
        /// Why the value was rejected
        reason: String,
    },
}

impl Default for ApiTesterConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            controller_suffix: default_controller_suffix(),
            exclude_dirs: default_exclude_dirs(),
            frameworks: default_frameworks(),
            default_base_url: default_base_url(),
            default_headers: HashMap::new(),
        }
    }
}

impl ApiTesterConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout == 0 {
            return Err(ConfigError::Invalid {
                field: "timeout",
                reason: "must be greater than 0".to_string(),
            });
        }

        if self.controller_suffix.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "controllerSuffix",
                reason: "must not be empty".to_string(),
            });
        }

        if self.frameworks.is_empty() {
            return Err(ConfigError::Invalid {
                field: "frameworks",
                reason: "at least one framework must be enabled".to_string(),
            });
        }

        if let Err(e) = url::Url::parse(&self.default_base_url) {
            return Err(ConfigError::Invalid {
                field: "defaultBaseUrl",
                reason: e.to_string(),
            });
        }

        Ok(())
    }

    /// Merges user settings over these settings.
    ///
    /// Serde defaults already filled every missing field of `other`, so a
    /// field only wins when it differs from the default.
    pub fn merge(&self, other: &ApiTesterConfig) -> Self {
        let defaults = ApiTesterConfig::default();
        let mut merged = self.clone();

        if other.timeout != defaults.timeout {
            merged.timeout = other.timeout;
        }
        if other.controller_suffix != defaults.controller_suffix {
            merged.controller_suffix = other.controller_suffix.clone();
        }
        if other.exclude_dirs != defaults.exclude_dirs {
            merged.exclude_dirs = other.exclude_dirs.clone();
        }
        if other.frameworks != defaults.frameworks {
            merged.frameworks = other.frameworks.clone();
        }
        if other.default_base_url != defaults.default_base_url {
            merged.default_base_url = other.default_base_url.clone();
        }
        for (name, value) in &other.default_headers {
            merged.default_headers.insert(name.clone(), value.clone());
        }

        merged
    }
}

fn default_timeout() -> u64 {
    10_000
}

fn default_controller_suffix() -> String {
    ".controller.ts".to_string()
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_frameworks() -> Vec<Framework> {
    vec![Framework::Nest]
}

fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}

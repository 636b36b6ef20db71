//! # Application configuration — `moneta.toml`
//!
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:8000"
//! timeout_secs = 10
//!
//! [display]
//! currency = "INR"
//! ```
//!
//! All sections derive `Default` so a missing or empty config file is
//! equivalent to the default configuration. `MONETA_API_URL` overrides the
//! base URL at startup.

use serde::{Deserialize, Serialize};

/// Top-level configuration stored in `moneta.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Backend connection configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the REST backend, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. 0 disables the timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Presentation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// ISO 4217 code of the currency amounts are shown in.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_currency() -> String {
    "INR".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
        }
    }
}

impl AppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "moneta.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Default config with environment overrides applied
    /// (`MONETA_API_URL` on native targets).
    pub fn load() -> Self {
        let mut config = Self::default();
        #[cfg(not(target_arch = "wasm32"))]
        if let Ok(url) = std::env::var("MONETA_API_URL") {
            if !url.trim().is_empty() {
                config.api.base_url = url.trim_end_matches('/').to_string();
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.timeout_secs, 10);
        assert_eq!(config.display.currency, "INR");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config = AppConfig::from_toml("[api]\nbase_url = \"https://money.example\"\n").unwrap();
        assert_eq!(config.api.base_url, "https://money.example");
        assert_eq!(config.api.timeout_secs, 10);
    }
}

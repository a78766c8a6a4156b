use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::time::Duration;

/// Session and API client configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Base URL of the TheMealDB v1 JSON API
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Quiescence window applied to search text edits, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Result entries with exactly this name are dropped from every list
    #[serde(default = "default_excluded_title")]
    pub excluded_title: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: default_timeout_secs(),
            excluded_title: default_excluded_title(),
        }
    }
}

// Default value functions
fn default_api_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    30
}

// The API serves an entry under this name with a broken image
fn default_excluded_title() -> String {
    "Kuurdak".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with QUICKBITE__ prefix
    /// 2. quickbite.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: QUICKBITE__DEBOUNCE_MS
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Load configuration from `quickbite.toml` and `QUICKBITE__*` environment variables
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("quickbite").required(false))
        .add_source(
            Environment::with_prefix("QUICKBITE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

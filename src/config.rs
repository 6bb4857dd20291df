//! Application settings and configuration

use crate::queue::DelayRange;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable overriding [`Settings::api_key`]
pub const ENV_API_KEY: &str = "WAPANEL_API_KEY";
/// Environment variable overriding [`Settings::gateway_url`]
pub const ENV_GATEWAY_URL: &str = "WAPANEL_GATEWAY_URL";
/// Environment variable overriding [`Settings::backend_url`]
pub const ENV_BACKEND_URL: &str = "WAPANEL_BACKEND_URL";

/// Application settings
///
/// Settings are stored in JSON format. A missing or empty file yields the
/// defaults, and unknown or absent keys fall back to their default values.
///
/// # Example
/// ```rust,no_run
/// use wapanel::config::Settings;
///
/// let settings = Settings::load("wapanel.json").expect("Failed to load");
/// println!("Gateway: {}", settings.gateway_url);
/// println!("Polling every {:?}", settings.poll_interval());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base address of the WhatsApp gateway
    pub gateway_url: String,
    /// Base address of the favorites/history backend
    pub backend_url: String,
    /// Static key sent as `X-Api-Key` to the gateway
    pub api_key: String,
    /// Gateway session used for sending
    pub session: String,
    /// Seconds between session status fetches
    pub poll_interval_secs: u64,
    /// Default lower bound of the bulk send delay (seconds)
    pub default_min_delay: u64,
    /// Default upper bound of the bulk send delay (seconds)
    pub default_max_delay: u64,
    /// How long a notification stays visible (milliseconds)
    pub toast_ttl_ms: u64,
    /// File receiving log output
    pub log_file: String,
    /// Maximum log level (`error`, `warn`, `info`, `debug`, `trace`)
    pub log_level: String,
}

impl Settings {
    /// Load settings from a JSON file
    ///
    /// Returns default settings if the file doesn't exist or is empty.
    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read settings: {}", e)))?;

        if data.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))
    }

    /// Save settings to a JSON file, creating parent directories
    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    Error::Config(format!("Failed to create settings directory: {}", e))
                })?;
            }
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
            .map_err(|e| Error::Config(format!("Failed to write settings: {}", e)))?;

        Ok(())
    }

    /// Apply `WAPANEL_*` environment overrides
    pub fn apply_env(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply overrides from an arbitrary lookup (environment in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty(ENV_API_KEY) {
            self.api_key = key;
        }
        if let Some(url) = non_empty(ENV_GATEWAY_URL) {
            self.gateway_url = url;
        }
        if let Some(url) = non_empty(ENV_BACKEND_URL) {
            self.backend_url = url;
        }
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.gateway_url.trim().is_empty() {
            return Err(Error::Config("gateway_url must not be empty".to_string()));
        }
        if self.backend_url.trim().is_empty() {
            return Err(Error::Config("backend_url must not be empty".to_string()));
        }
        if self.session.trim().is_empty() {
            return Err(Error::Config("session must not be empty".to_string()));
        }
        if self.poll_interval_secs == 0 {
            return Err(Error::Config("poll_interval_secs must be at least 1".to_string()));
        }
        self.default_delay_range()
            .map_err(|e| Error::Config(format!("Invalid default delay range: {}", e)))?;
        Ok(())
    }

    /// Session poll interval
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    /// Notification display window
    pub fn toast_ttl(&self) -> Duration {
        Duration::from_millis(self.toast_ttl_ms)
    }

    /// Default bulk send delay range
    pub fn default_delay_range(&self) -> Result<DelayRange> {
        DelayRange::new(self.default_min_delay, self.default_max_delay)
    }

    /// Parsed log level, `info` when unrecognized
    pub fn log_level(&self) -> tracing::Level {
        self.log_level
            .trim()
            .parse()
            .unwrap_or(tracing::Level::INFO)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gateway_url: "http://localhost:3001".to_string(),
            backend_url: "http://localhost:3002".to_string(),
            api_key: String::new(),
            session: "default".to_string(),
            poll_interval_secs: 5,
            default_min_delay: 3,
            default_max_delay: 10,
            toast_ttl_ms: 3000,
            log_file: "wapanel.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

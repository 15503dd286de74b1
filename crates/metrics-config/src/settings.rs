//! Configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub endpoint: EndpointSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub name: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "metrics-dash".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Metrics endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointSettings {
    pub url: String,
    pub timeout_secs: u64,
}

impl EndpointSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000/metrics/json".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplaySettings {
    pub title: String,
    /// Seconds between fetch cycles
    pub refresh_interval_secs: u64,
    /// Terminal input poll period in milliseconds
    pub tick_ms: u64,
}

impl DisplaySettings {
    pub fn cadence(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            title: "Metrics Dashboard".to_string(),
            refresh_interval_secs: 15,
            tick_ms: 250,
        }
    }
}

//! Configuration management.

mod settings;

pub use settings::{AppConfig, AppSettings, DisplaySettings, EndpointSettings, LoggingConfig};

use config::{Config, ConfigError, Environment, File};
use std::path::Path;
use thiserror::Error;

/// Prefix for environment overrides, e.g. `METRICS_DASH__ENDPOINT__URL`.
pub const ENV_PREFIX: &str = "METRICS_DASH";

/// Semantic problems in an otherwise well-formed configuration.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("endpoint.url must not be empty")]
    EmptyUrl,

    #[error("endpoint.url must be an http or https URL: {0}")]
    UnsupportedUrl(String),

    #[error("endpoint.timeout_secs must be greater than zero")]
    ZeroTimeout,

    #[error("display.refresh_interval_secs must be greater than zero")]
    ZeroInterval,

    #[error("display.tick_ms must be greater than zero")]
    ZeroTick,

    #[error("logging.format must be 'pretty' or 'json', got '{0}'")]
    UnknownLogFormat(String),
}

/// Error returned by [`load_and_validate`].
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Configuration error: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

/// Load configuration from file and environment.
///
/// When `required` is false a missing file falls back to defaults.
pub fn load_config(path: &Path, required: bool) -> Result<AppConfig, ConfigError> {
    load_with_prefix(path, required, ENV_PREFIX)
}

fn load_with_prefix(path: &Path, required: bool, prefix: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from(path).required(required))
        .add_source(
            Environment::with_prefix(prefix)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    config.try_deserialize()
}

/// Load and validate in one step.
pub fn load_and_validate(path: &Path, required: bool) -> Result<AppConfig, SettingsError> {
    let config = load_config(path, required)?;
    validate(&config)?;
    Ok(config)
}

/// Check values the type system cannot.
pub fn validate(config: &AppConfig) -> Result<(), ValidationError> {
    let url = config.endpoint.url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ValidationError::UnsupportedUrl(url.to_string()));
    }
    if config.endpoint.timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout);
    }
    if config.display.refresh_interval_secs == 0 {
        return Err(ValidationError::ZeroInterval);
    }
    if config.display.tick_ms == 0 {
        return Err(ValidationError::ZeroTick);
    }
    let format = config.logging.format.to_ascii_lowercase();
    if format != "pretty" && format != "json" {
        return Err(ValidationError::UnknownLogFormat(config.logging.format.clone()));
    }
    Ok(())
}

/// Serialize a configuration back to TOML.
pub fn to_toml(config: &AppConfig) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(config)
}

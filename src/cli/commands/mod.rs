//! CLI command implementations.

pub mod once;
pub mod validate;
pub mod watch;

use anyhow::{Context, Result};
use metrics_config::AppConfig;
use metrics_source::{HttpSource, HttpSourceConfig};

/// Build the HTTP source for `url`, falling back to the configured endpoint.
pub(crate) fn http_source(url: Option<&str>, config: &AppConfig) -> Result<HttpSource> {
    let url = url.unwrap_or(&config.endpoint.url);
    let source_config = HttpSourceConfig::new(url).with_timeout(config.endpoint.timeout());
    HttpSource::new(source_config).with_context(|| format!("Invalid metrics endpoint {}", url))
}

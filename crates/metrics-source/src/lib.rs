//! Metrics sources.

mod http;
mod scripted;

pub use http::{HttpSource, HttpSourceConfig, DEFAULT_TIMEOUT};
pub use scripted::ScriptedSource;

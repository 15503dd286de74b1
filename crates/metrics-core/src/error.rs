//! Error types for the metrics dashboard.

use thiserror::Error;

/// Failure of a single fetch cycle.
///
/// The state holder treats every variant the same way; the distinction only
/// exists for logging.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected status {status}: {body}")]
    Protocol { status: u16, body: String },

    #[error("Parse error: {0}")]
    Parse(String),
}

impl FetchError {
    /// Short label for the failure class, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Network(_) => "network",
            FetchError::Protocol { .. } => "protocol",
            FetchError::Parse(_) => "parse",
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Parse(err.to_string())
    }
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = Result<T, FetchError>;

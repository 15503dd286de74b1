//! Core types and traits for the metrics dashboard.
//!
//! This crate provides the foundational building blocks including:
//! - Snapshot types (MetricsSnapshot, MetricValue)
//! - The display state and the holder that owns it
//! - The `MetricsSource` trait implemented by fetchers

pub mod error;
pub mod state;
pub mod traits;
pub mod types;

pub use error::{FetchError, FetchResult};
pub use state::StateHolder;
pub use traits::*;
pub use types::*;

//! Core data types.

mod display_state;
mod snapshot;

pub use display_state::DisplayState;
pub use snapshot::{Metric, MetricValue, MetricsSnapshot};

//! Core traits for the metrics dashboard.

mod source;

pub use source::MetricsSource;

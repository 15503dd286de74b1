//! Metrics rendering, TUI dashboard and logging.

mod dashboard;
mod logging;
mod render;

pub use dashboard::Dashboard;
pub use logging::{setup_logging, LogTarget};
pub use render::{print_plain, render, MetricRow, View, LOADING_TEXT};

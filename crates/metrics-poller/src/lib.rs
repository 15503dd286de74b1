//! Polling scheduler and live display lifecycle.

mod display;
mod scheduler;

pub use display::LiveDisplay;
pub use scheduler::{Scheduler, DEFAULT_CADENCE};

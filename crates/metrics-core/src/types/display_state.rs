//! What the display currently shows.

use std::sync::Arc;

use super::MetricsSnapshot;

/// The display's current state.
///
/// `Loading` until the first successful fetch, then `Ready` with the most
/// recent snapshot. A failed fetch never moves the state.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DisplayState {
    #[default]
    Loading,
    Ready(Arc<MetricsSnapshot>),
}

impl DisplayState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DisplayState::Loading)
    }

    /// The current snapshot, if any.
    pub fn snapshot(&self) -> Option<&MetricsSnapshot> {
        match self {
            DisplayState::Loading => None,
            DisplayState::Ready(snapshot) => Some(snapshot),
        }
    }
}

impl From<MetricsSnapshot> for DisplayState {
    fn from(snapshot: MetricsSnapshot) -> Self {
        DisplayState::Ready(Arc::new(snapshot))
    }
}

//! Live display lifecycle.

use metrics_core::traits::MetricsSource;
use metrics_core::types::DisplayState;
use metrics_core::StateHolder;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::scheduler::{Scheduler, DEFAULT_CADENCE};

/// State and timer belonging to one activation.
struct Session {
    holder: Arc<StateHolder>,
    scheduler: Scheduler,
}

/// A metrics display driven by a host's show/hide lifecycle.
///
/// `activate` creates a fresh `Loading` state and starts polling;
/// `deactivate` stops the timer and discards the state. Dropping an active
/// display deactivates it.
pub struct LiveDisplay {
    source: Arc<dyn MetricsSource>,
    cadence: Duration,
    session: Option<Session>,
}

impl LiveDisplay {
    /// Create an inactive display polling `source` every 15 seconds.
    pub fn new(source: Arc<dyn MetricsSource>) -> Self {
        Self {
            source,
            cadence: DEFAULT_CADENCE,
            session: None,
        }
    }

    /// Set the interval between fetch cycles.
    pub fn with_cadence(mut self, cadence: Duration) -> Self {
        self.cadence = cadence;
        self
    }

    /// Show the display: start polling and return a receiver notified on
    /// every state change. Activating an already active display returns a
    /// receiver for the running session.
    pub fn activate(&mut self) -> watch::Receiver<DisplayState> {
        if let Some(session) = &self.session {
            debug!("display already active");
            return session.holder.subscribe();
        }

        let holder = Arc::new(StateHolder::new());
        let rx = holder.subscribe();
        let scheduler = Scheduler::start(self.source.clone(), holder.clone(), self.cadence);

        info!(
            source = self.source.name(),
            cadence_secs = self.cadence.as_secs_f64(),
            "display activated"
        );
        self.session = Some(Session { holder, scheduler });
        rx
    }

    /// Hide the display: cancel the timer and drop any result still in
    /// flight. Safe to call when inactive.
    pub fn deactivate(&mut self) {
        if let Some(session) = self.session.take() {
            session.scheduler.stop();
            session.holder.close();
            info!(source = self.source.name(), "display deactivated");
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current state, or `None` while inactive.
    pub fn current(&self) -> Option<DisplayState> {
        self.session.as_ref().map(|s| s.holder.current())
    }

    pub fn cadence(&self) -> Duration {
        self.cadence
    }
}

impl Drop for LiveDisplay {
    fn drop(&mut self) {
        self.deactivate();
    }
}

//! Fixed-cadence fetch scheduler.

use metrics_core::traits::MetricsSource;
use metrics_core::StateHolder;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::debug;

/// Interval between fetch cycles.
pub const DEFAULT_CADENCE: Duration = Duration::from_secs(15);

/// Triggers one fetch cycle immediately and then one per cadence.
///
/// Every cycle runs as its own task, so a slow fetch never delays the next
/// trigger and overlapping cycles simply race to `apply`. Stopping (or
/// dropping) the scheduler cancels the timer; cycles already in flight are
/// left to finish and rely on the holder being closed.
pub struct Scheduler {
    ticker: JoinHandle<()>,
}

impl Scheduler {
    /// Start the timer on the current tokio runtime.
    ///
    /// # Panics
    /// Panics if `cadence` is zero or when called outside a tokio runtime.
    pub fn start(
        source: Arc<dyn MetricsSource>,
        holder: Arc<StateHolder>,
        cadence: Duration,
    ) -> Self {
        let mut ticks = interval(cadence);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let ticker = tokio::spawn(async move {
            let mut cycle: u64 = 0;
            loop {
                ticks.tick().await;
                cycle += 1;
                tokio::spawn(run_cycle(cycle, source.clone(), holder.clone()));
            }
        });

        Self { ticker }
    }

    /// Cancel the timer. Idempotent.
    pub fn stop(&self) {
        self.ticker.abort();
    }

    pub fn is_running(&self) -> bool {
        !self.ticker.is_finished()
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.ticker.abort();
    }
}

/// One fetch-and-apply cycle.
async fn run_cycle(cycle: u64, source: Arc<dyn MetricsSource>, holder: Arc<StateHolder>) {
    // A cycle spawned just before deactivation must not start a fetch.
    if holder.is_closed() {
        debug!(cycle, "display closed before cycle started");
        return;
    }

    debug!(cycle, source = source.name(), "fetch cycle started");
    let result = source.fetch().await;
    holder.apply(result);
}

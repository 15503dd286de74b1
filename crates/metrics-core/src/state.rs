//! State holder for one active display.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::FetchResult;
use crate::types::{DisplayState, MetricsSnapshot};

/// Owns the `DisplayState` of a single display activation.
///
/// Only `apply` mutates the state. Readers either take a copy with
/// `current` or subscribe to change notifications. Once `close` has been
/// called every later result is dropped.
#[derive(Debug)]
pub struct StateHolder {
    tx: watch::Sender<DisplayState>,
    closed: AtomicBool,
}

impl StateHolder {
    /// Create a holder in the `Loading` state.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(DisplayState::Loading);
        Self {
            tx,
            closed: AtomicBool::new(false),
        }
    }

    /// Apply the outcome of one fetch cycle.
    ///
    /// Returns `true` when the state was replaced. Failures and results
    /// arriving after `close` leave the state untouched.
    pub fn apply(&self, result: FetchResult<MetricsSnapshot>) -> bool {
        match result {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);
                let metrics = snapshot.len();
                // The closed check runs under the channel's write lock so it
                // cannot interleave with `close`.
                let applied = self.tx.send_if_modified(|state| {
                    if self.closed.load(Ordering::Acquire) {
                        return false;
                    }
                    *state = DisplayState::Ready(snapshot);
                    true
                });

                if applied {
                    debug!(metrics, "applied snapshot");
                } else {
                    debug!(metrics, "display closed, dropping snapshot");
                }
                applied
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "fetch failed, keeping previous state");
                false
            }
        }
    }

    /// Copy of the current state. Always a fully-formed snapshot or `Loading`.
    pub fn current(&self) -> DisplayState {
        self.tx.borrow().clone()
    }

    /// Receiver notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<DisplayState> {
        self.tx.subscribe()
    }

    /// Stop accepting results. Idempotent.
    pub fn close(&self) {
        self.tx.send_if_modified(|_| {
            self.closed.store(true, Ordering::Release);
            false
        });
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }
}

impl Default for StateHolder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    fn snapshot(pairs: &[(&str, i64)]) -> MetricsSnapshot {
        MetricsSnapshot::from_pairs(pairs.iter().map(|(k, v)| (*k, *v))).unwrap()
    }

    #[test]
    fn test_starts_loading() {
        let holder = StateHolder::new();
        assert_eq!(holder.current(), DisplayState::Loading);
        assert!(!holder.is_closed());
    }

    #[test]
    fn test_failures_never_change_state() {
        let holder = StateHolder::new();
        let a = snapshot(&[("cpu", 1)]);
        let b = snapshot(&[("cpu", 2)]);

        let mut observed = vec![holder.current()];
        let outcomes = vec![
            Err(FetchError::Network("connection refused".into())),
            Ok(a.clone()),
            Err(FetchError::Protocol {
                status: 500,
                body: String::new(),
            }),
            Ok(b.clone()),
        ];
        for outcome in outcomes {
            holder.apply(outcome);
            observed.push(holder.current());
        }

        assert_eq!(
            observed,
            vec![
                DisplayState::Loading,
                DisplayState::Loading,
                DisplayState::from(a.clone()),
                DisplayState::from(a),
                DisplayState::from(b),
            ]
        );
    }

    #[test]
    fn test_closed_holder_drops_results() {
        let holder = StateHolder::new();
        holder.apply(Ok(snapshot(&[("cpu", 1)])));
        holder.close();

        assert!(!holder.apply(Ok(snapshot(&[("cpu", 2)]))));
        assert_eq!(
            holder.current().snapshot().unwrap().get("cpu").unwrap().to_string(),
            "1"
        );
        assert!(holder.is_closed());
    }

    #[test]
    fn test_subscribers_see_successes_only() {
        let holder = StateHolder::new();
        let mut rx = holder.subscribe();
        assert!(!rx.has_changed().unwrap());

        holder.apply(Err(FetchError::Parse("bad".into())));
        assert!(!rx.has_changed().unwrap());

        holder.apply(Ok(snapshot(&[("mem", 10)])));
        assert!(rx.has_changed().unwrap());
        assert!(!rx.borrow_and_update().is_loading());
    }

    #[test]
    fn test_close_does_not_notify() {
        let holder = StateHolder::new();
        let rx = holder.subscribe();
        holder.close();
        holder.close();
        assert!(!rx.has_changed().unwrap());
    }
}

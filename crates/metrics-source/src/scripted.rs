//! Scripted metrics source for simulation and tests.

use async_trait::async_trait;
use metrics_core::error::{FetchError, FetchResult};
use metrics_core::traits::MetricsSource;
use metrics_core::types::MetricsSnapshot;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

struct Step {
    delay: Duration,
    outcome: FetchResult<MetricsSnapshot>,
}

/// Replays a queue of fetch outcomes, one per call.
///
/// Each outcome may be delayed to simulate a slow endpoint. Once the script
/// runs out every call fails with a network error. Call times are recorded
/// on the tokio clock so paused-time tests can assert the cadence.
#[derive(Clone)]
pub struct ScriptedSource {
    name: String,
    steps: Arc<Mutex<VecDeque<Step>>>,
    calls: Arc<Mutex<Vec<Instant>>>,
}

impl ScriptedSource {
    /// Create an empty script.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steps: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an outcome returned immediately.
    pub fn push(&self, outcome: FetchResult<MetricsSnapshot>) -> &Self {
        self.push_delayed(Duration::ZERO, outcome)
    }

    /// Queue an outcome returned after `delay`.
    pub fn push_delayed(&self, delay: Duration, outcome: FetchResult<MetricsSnapshot>) -> &Self {
        self.steps
            .lock()
            .unwrap()
            .push_back(Step { delay, outcome });
        self
    }

    /// Number of fetches performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Instants at which each fetch started.
    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }

    /// Outcomes still queued.
    pub fn remaining(&self) -> usize {
        self.steps.lock().unwrap().len()
    }
}

#[async_trait]
impl MetricsSource for ScriptedSource {
    async fn fetch(&self) -> FetchResult<MetricsSnapshot> {
        self.calls.lock().unwrap().push(Instant::now());
        let step = self.steps.lock().unwrap().pop_front();

        match step {
            Some(Step { delay, outcome }) => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                outcome
            }
            None => Err(FetchError::Network("script exhausted".into())),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

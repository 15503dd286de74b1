//! Display state to view.

use chrono::{DateTime, Utc};
use metrics_core::types::DisplayState;
use std::fmt;
use std::io::{self, Write};

/// Text shown until the first snapshot arrives.
pub const LOADING_TEXT: &str = "Loading metrics...";

/// One labeled metric line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricRow {
    pub name: String,
    pub value: String,
}

impl fmt::Display for MetricRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// What the user sees for a given state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    /// A single loading indicator, no rows.
    Loading,
    /// One row per metric in snapshot order.
    Metrics {
        rows: Vec<MetricRow>,
        updated_at: DateTime<Utc>,
    },
}

impl View {
    pub fn is_loading(&self) -> bool {
        matches!(self, View::Loading)
    }

    /// Metric rows; empty while loading.
    pub fn rows(&self) -> &[MetricRow] {
        match self {
            View::Loading => &[],
            View::Metrics { rows, .. } => rows.as_slice(),
        }
    }

    /// Plain-text rendering, one entry per visible line.
    pub fn lines(&self) -> Vec<String> {
        match self {
            View::Loading => vec![LOADING_TEXT.to_string()],
            View::Metrics { rows, .. } => rows.iter().map(|r| r.to_string()).collect(),
        }
    }
}

/// Derive the view for `state`. Pure: no I/O, no timers.
pub fn render(state: &DisplayState) -> View {
    match state {
        DisplayState::Loading => View::Loading,
        DisplayState::Ready(snapshot) => View::Metrics {
            rows: snapshot
                .iter()
                .map(|m| MetricRow {
                    name: m.name.clone(),
                    value: m.value.to_string(),
                })
                .collect(),
            updated_at: snapshot.received_at(),
        },
    }
}

/// Write a view as plain text followed by a blank separator line.
pub fn print_plain<W: Write>(out: &mut W, view: &View) -> io::Result<()> {
    for line in view.lines() {
        writeln!(out, "{}", line)?;
    }
    writeln!(out)?;
    out.flush()
}

//! Metrics snapshot types.

use chrono::{DateTime, Utc};
use serde_json::{Number, Value};
use std::fmt;

use crate::error::FetchError;

/// A single metric value. Opaque to the dashboard: numbers are never
/// interpreted, only displayed.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Number(Number),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Number(n) => write!(f, "{}", n),
            MetricValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MetricValue {
    fn from(value: i64) -> Self {
        MetricValue::Number(value.into())
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        MetricValue::Number(value.into())
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        MetricValue::Text(value.to_string())
    }
}

impl From<String> for MetricValue {
    fn from(value: String) -> Self {
        MetricValue::Text(value)
    }
}

/// A named metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub name: String,
    pub value: MetricValue,
}

/// One complete metrics document as returned by one fetch.
///
/// Metric names are non-empty and unique. Iteration follows the order the
/// names appeared in the source document.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSnapshot {
    metrics: Vec<Metric>,
    received_at: DateTime<Utc>,
}

impl MetricsSnapshot {
    /// Build a snapshot from name/value pairs.
    ///
    /// A repeated name keeps its first position and takes the last value,
    /// matching how a JSON object with duplicate keys is read.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self, FetchError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<MetricValue>,
    {
        let mut metrics: Vec<Metric> = Vec::new();
        for (name, value) in pairs {
            let name = name.into();
            if name.is_empty() {
                return Err(FetchError::Parse("metric name must not be empty".into()));
            }
            let value = value.into();
            match metrics.iter_mut().find(|m| m.name == name) {
                Some(existing) => existing.value = value,
                None => metrics.push(Metric { name, value }),
            }
        }

        Ok(Self {
            metrics,
            received_at: Utc::now(),
        })
    }

    /// Parse a response body as a flat key-value JSON object.
    pub fn from_json(body: &[u8]) -> Result<Self, FetchError> {
        let value: Value = serde_json::from_slice(body)?;
        Self::from_value(value)
    }

    /// Convert an already-decoded JSON document.
    pub fn from_value(value: Value) -> Result<Self, FetchError> {
        let Value::Object(map) = value else {
            return Err(FetchError::Parse(format!(
                "expected a JSON object, found {}",
                json_type(&value)
            )));
        };

        let mut pairs = Vec::with_capacity(map.len());
        for (name, value) in map {
            let value = match value {
                Value::Number(n) => MetricValue::Number(n),
                Value::String(s) => MetricValue::Text(s),
                other => {
                    return Err(FetchError::Parse(format!(
                        "metric '{}' has unsupported {} value",
                        name,
                        json_type(&other)
                    )))
                }
            };
            pairs.push((name, value));
        }

        Self::from_pairs(pairs)
    }

    /// Override the receive timestamp.
    pub fn with_received_at(mut self, received_at: DateTime<Utc>) -> Self {
        self.received_at = received_at;
        self
    }

    /// Metrics in source order.
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Iterate over the metrics in source order.
    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    /// Look up a metric value by name.
    pub fn get(&self, name: &str) -> Option<&MetricValue> {
        self.metrics
            .iter()
            .find(|m| m.name == name)
            .map(|m| &m.value)
    }

    /// When this snapshot was received.
    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

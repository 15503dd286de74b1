//! Metrics source trait definition.

use crate::error::FetchResult;
use crate::types::MetricsSnapshot;
use async_trait::async_trait;

/// Trait for anything that can produce a metrics snapshot.
///
/// Implementations perform exactly one request/response cycle per call and
/// never touch display state; the caller applies the result.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch one snapshot.
    ///
    /// # Returns
    /// The parsed snapshot, or a `FetchError` describing why none is available
    async fn fetch(&self) -> FetchResult<MetricsSnapshot>;

    /// Get the source name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    struct Fixed(Option<i64>);

    #[async_trait]
    impl MetricsSource for Fixed {
        async fn fetch(&self) -> FetchResult<MetricsSnapshot> {
            match self.0 {
                Some(v) => MetricsSnapshot::from_pairs([("value", v)]),
                None => Err(FetchError::Network("unreachable".into())),
            }
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_source_as_trait_object() {
        let sources: Vec<Box<dyn MetricsSource>> =
            vec![Box::new(Fixed(Some(7))), Box::new(Fixed(None))];

        let first = sources[0].fetch().await.unwrap();
        assert_eq!(first.get("value").unwrap().to_string(), "7");
        assert!(sources[1].fetch().await.is_err());
        assert_eq!(sources[0].name(), "fixed");
    }
}

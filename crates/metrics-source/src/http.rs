//! HTTP metrics endpoint client.

use async_trait::async_trait;
use metrics_core::error::{FetchError, FetchResult};
use metrics_core::traits::MetricsSource;
use metrics_core::types::MetricsSnapshot;
use reqwest::{header, Client, Response, Url};
use std::time::Duration;
use tracing::debug;

/// Request timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest response body kept in a `Protocol` error.
const MAX_ERROR_BODY: usize = 256;

/// HTTP source configuration.
#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub url: String,
    pub timeout: Duration,
}

impl HttpSourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Fetches a flat JSON metrics document with a single GET.
pub struct HttpSource {
    url: Url,
    client: Client,
}

impl HttpSource {
    /// Create a new HTTP source.
    pub fn new(config: HttpSourceConfig) -> Result<Self, FetchError> {
        let url = Url::parse(&config.url)
            .map_err(|e| FetchError::Network(format!("invalid endpoint {}: {}", config.url, e)))?;

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl MetricsSource for HttpSource {
    async fn fetch(&self) -> FetchResult<MetricsSnapshot> {
        debug!(url = %self.url, "requesting metrics");

        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Protocol {
                status: status.as_u16(),
                body: read_prefix(resp, MAX_ERROR_BODY).await,
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        MetricsSnapshot::from_json(&body)
    }

    fn name(&self) -> &str {
        self.url.as_str()
    }
}

/// Read at most about `max` bytes of an error body. Read failures end the
/// body early; the status code is what matters.
async fn read_prefix(mut resp: Response, max: usize) -> String {
    let mut buf = Vec::new();
    while buf.len() < max {
        match resp.chunk().await {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            _ => break,
        }
    }
    truncate(String::from_utf8_lossy(&buf).into_owned(), max)
}

fn truncate(mut text: String, max: usize) -> String {
    if text.len() > max {
        let mut end = max;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the endpoint URL.
    async fn serve_once(status_line: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });

        format!("http://{}/metrics/json", addr)
    }

    fn source(url: &str) -> HttpSource {
        HttpSource::new(HttpSourceConfig::new(url).with_timeout(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once("200 OK", r#"{"cpu": 42, "status": "ok"}"#).await;

        let snapshot = source(&url).fetch().await.unwrap();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.metrics()[0].name, "cpu");
        assert_eq!(snapshot.get("cpu").unwrap().to_string(), "42");
        assert_eq!(snapshot.get("status").unwrap().to_string(), "ok");
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let url = serve_once("503 Service Unavailable", r#"{"error": "down"}"#).await;

        let err = source(&url).fetch().await.unwrap_err();

        assert_eq!(
            err,
            FetchError::Protocol {
                status: 503,
                body: r#"{"error": "down"}"#.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_large_error_body_is_cut() {
        let body = "x".repeat(64 * 1024);
        let url = serve_once("500 Internal Server Error", &body).await;

        let err = source(&url).fetch().await.unwrap_err();

        match err {
            FetchError::Protocol { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body.len(), MAX_ERROR_BODY);
                assert!(body.chars().all(|c| c == 'x'));
            }
            other => panic!("expected protocol error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_object_body() {
        let url = serve_once("200 OK", "[1, 2, 3]").await;

        let err = source(&url).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let url = serve_once("200 OK", "<html>oops</html>").await;

        let err = source(&url).fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = source(&format!("http://{}/metrics/json", addr))
            .fetch()
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            // Accept and hold the connection without answering.
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let source = HttpSource::new(
            HttpSourceConfig::new(format!("http://{}/", addr))
                .with_timeout(Duration::from_millis(200)),
        )
        .unwrap();

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[test]
    fn test_invalid_url() {
        let result = HttpSource::new(HttpSourceConfig::new("not a url"));
        assert!(matches!(result, Err(FetchError::Network(_))));
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef".to_string(), 3), "abc");
        assert_eq!(truncate("héllo".to_string(), 2), "h");
        assert_eq!(truncate("short".to_string(), 256), "short");
    }
}

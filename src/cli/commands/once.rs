//! Single fetch command implementation.

use anyhow::{Context, Result};
use metrics_config::{validate, AppConfig};
use metrics_core::traits::MetricsSource;
use metrics_core::types::DisplayState;
use metrics_monitor::{print_plain, render};
use std::io::{self, Write};
use tracing::info;

use super::http_source;
use crate::cli::OnceArgs;

pub async fn run(args: OnceArgs, config: &AppConfig) -> Result<()> {
    fetch_and_print(args, config, &mut io::stdout()).await
}

async fn fetch_and_print<W: Write>(args: OnceArgs, config: &AppConfig, out: &mut W) -> Result<()> {
    validate(config)?;

    let source = http_source(args.url.as_deref(), config)?;
    info!("Fetching metrics from {}", source.name());

    let snapshot = source
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch metrics from {}", source.name()))?;

    let view = render(&DisplayState::from(snapshot));
    print_plain(out, &view)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_core::FetchError;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

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

    #[tokio::test]
    async fn test_prints_metrics() {
        let url = serve_once("200 OK", r#"{"cpu": 42, "status": "ok", "load": 0.50}"#).await;
        let args = OnceArgs { url: Some(url) };

        let mut out = Vec::new();
        fetch_and_print(args, &AppConfig::default(), &mut out)
            .await
            .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "cpu: 42\nstatus: ok\nload: 0.50\n\n"
        );
    }

    #[tokio::test]
    async fn test_error_status_fails_without_output() {
        let url = serve_once("500 Internal Server Error", "boom").await;
        let args = OnceArgs {
            url: Some(url.clone()),
        };

        let mut out = Vec::new();
        let err = fetch_and_print(args, &AppConfig::default(), &mut out)
            .await
            .unwrap_err();

        assert!(out.is_empty());
        assert!(err.to_string().starts_with("Failed to fetch metrics from"));
        assert_eq!(
            err.downcast_ref::<FetchError>(),
            Some(&FetchError::Protocol {
                status: 500,
                body: "boom".into()
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_config_fails_before_fetch() {
        let mut config = AppConfig::default();
        config.endpoint.timeout_secs = 0;

        let mut out = Vec::new();
        let result = fetch_and_print(OnceArgs { url: None }, &config, &mut out).await;

        assert!(result.is_err());
        assert!(out.is_empty());
    }
}

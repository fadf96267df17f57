//! Liveness probe: short-timeout reachability checks against the backend.
//!
//! Decouples connect attempts from a backend that has not started yet. The
//! probe never fails outward; it retries with a fixed delay until the
//! endpoint answers, however long that takes.

use crate::config::SimvizConfig;

/// Probes `config.probe_url` until it answers, then returns.
///
/// Any HTTP response, regardless of status, counts as reachable. A timeout
/// (bounded by `config.probe_timeout`) or a network failure schedules the
/// next attempt after `config.probe_retry_delay`. No attempt limit.
pub async fn wait_until_reachable(http: &reqwest::Client, config: &SimvizConfig) {
    let mut attempts: u64 = 0;
    loop {
        let result = http
            .get(&config.probe_url)
            .timeout(config.probe_timeout)
            .send()
            .await;

        match result {
            Ok(_) => {
                tracing::debug!(attempts, url = %config.probe_url, "backend reachable");
                return;
            }
            Err(err) => {
                attempts += 1;
                tracing::trace!(attempts, error = %err, "probe failed, retrying");
                tokio::time::sleep(config.probe_retry_delay).await;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::AsyncWriteExt;

    /// Minimal HTTP responder that answers `responses` requests and then
    /// stops accepting.
    async fn serve_http_once(listener: tokio::net::TcpListener, responses: usize) {
        for _ in 0..responses {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let _ = stream
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\n\r\n")
                .await;
        }
    }

    #[tokio::test]
    async fn returns_once_endpoint_answers() {
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        tokio::spawn(serve_http_once(listener, 1));

        let config = SimvizConfig {
            probe_url: format!("http://{addr}"),
            probe_timeout: Duration::from_millis(200),
            probe_retry_delay: Duration::from_millis(10),
            ..SimvizConfig::default()
        };
        let http = reqwest::Client::new();

        // Must complete; bound the test so a regression fails instead of hanging.
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            wait_until_reachable(&http, &config),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn keeps_retrying_while_unreachable() {
        // Bind and drop to get a port with nothing listening.
        let Ok(listener) = tokio::net::TcpListener::bind("127.0.0.1:0").await else {
            panic!("bind failed");
        };
        let Ok(addr) = listener.local_addr() else {
            panic!("no local addr");
        };
        drop(listener);

        let config = SimvizConfig {
            probe_url: format!("http://{addr}"),
            probe_timeout: Duration::from_millis(50),
            probe_retry_delay: Duration::from_millis(10),
            ..SimvizConfig::default()
        };
        let http = reqwest::Client::new();

        // The probe must still be running (not resolved, not panicked)
        // after several would-be attempts.
        let result = tokio::time::timeout(
            Duration::from_millis(300),
            wait_until_reachable(&http, &config),
        )
        .await;
        assert!(result.is_err(), "probe must not resolve while unreachable");
    }
}

//! Client configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`), with defaults matching the reference
//! backend on `localhost:5678`. All delays are plain `Duration` fields so
//! tests can shrink them.

use std::time::Duration;

/// Top-level client configuration.
///
/// Loaded once at startup via [`SimvizConfig::from_env`], or constructed
/// directly when embedding the client.
#[derive(Debug, Clone)]
pub struct SimvizConfig {
    /// WebSocket endpoint of the simulation backend
    /// (e.g. `ws://localhost:5678`).
    pub server_url: String,

    /// HTTP endpoint probed for reachability before each connect attempt.
    /// Any HTTP response counts as reachable; only the probe's timeout or a
    /// network failure count against it.
    pub probe_url: String,

    /// Per-attempt timeout of the liveness probe.
    pub probe_timeout: Duration,

    /// Fixed delay between failed probe attempts.
    pub probe_retry_delay: Duration,

    /// Fixed delay between a session's teardown and the next connect cycle.
    /// Bounded and non-growing; there is deliberately no backoff.
    pub reconnect_delay: Duration,
}

impl SimvizConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to defaults when a variable is not set. Calls
    /// `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    #[must_use]
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let server_url = std::env::var("SIMVIZ_SERVER_URL")
            .unwrap_or_else(|_| "ws://localhost:5678".to_string());
        let probe_url = std::env::var("SIMVIZ_PROBE_URL")
            .unwrap_or_else(|_| "http://localhost:5678".to_string());

        Self {
            server_url,
            probe_url,
            probe_timeout: Duration::from_millis(parse_env("SIMVIZ_PROBE_TIMEOUT_MS", 200)),
            probe_retry_delay: Duration::from_millis(parse_env("SIMVIZ_PROBE_RETRY_MS", 200)),
            reconnect_delay: Duration::from_millis(parse_env("SIMVIZ_RECONNECT_DELAY_MS", 50)),
        }
    }
}

impl Default for SimvizConfig {
    fn default() -> Self {
        Self {
            server_url: "ws://localhost:5678".to_string(),
            probe_url: "http://localhost:5678".to_string(),
            probe_timeout: Duration::from_millis(200),
            probe_retry_delay: Duration::from_millis(200),
            reconnect_delay: Duration::from_millis(50),
        }
    }
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_target_localhost_backend() {
        let config = SimvizConfig::default();
        assert_eq!(config.server_url, "ws://localhost:5678");
        assert_eq!(config.probe_url, "http://localhost:5678");
        assert_eq!(config.probe_timeout, Duration::from_millis(200));
        assert_eq!(config.probe_retry_delay, Duration::from_millis(200));
    }
}

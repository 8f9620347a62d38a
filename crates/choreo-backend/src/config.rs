//! Adapter tuning knobs shared by every domain client.

use std::time::Duration;

/// Timeouts and retry pacing for backend adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Upper bound for a single unary backend call.
    pub request_timeout: Duration,
    /// Fixed delay between watch reconnect attempts.
    pub watch_backoff: Duration,
}

impl AdapterConfig {
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_watch_backoff(mut self, backoff: Duration) -> Self {
        self.watch_backoff = backoff;
        self
    }
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            watch_backoff: Duration::from_secs(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = AdapterConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!(config.watch_backoff, Duration::from_secs(1));
    }

    #[test]
    fn builders_override_single_field() {
        let config = AdapterConfig::default().with_watch_backoff(Duration::from_millis(50));
        assert_eq!(config.watch_backoff, Duration::from_millis(50));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
    }
}

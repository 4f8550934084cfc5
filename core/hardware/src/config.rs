//! Scanner configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delay between the end of one scan and the start of the next.
pub const HW_SCAN_INTERVAL: Duration = Duration::from_millis(5000);

/// Configuration for the device scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Poll interval in milliseconds.
    pub interval_ms: u64,
    /// Upper bound for a single device or node fetch. `None` waits forever.
    pub fetch_timeout_ms: Option<u64>,
}

impl ScannerConfig {
    /// Poll interval.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    /// Fetch timeout, if bounded.
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }

    /// Set the poll interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval_ms = millis(interval);
        self
    }

    /// Bound every fetch by `timeout`.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_ms = Some(millis(timeout));
        self
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            interval_ms: millis(HW_SCAN_INTERVAL),
            fetch_timeout_ms: None,
        }
    }
}

/// Whole milliseconds in `d`, saturating at `u64::MAX`.
fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScannerConfig::default();
        assert_eq!(config.interval(), HW_SCAN_INTERVAL);
        assert_eq!(config.fetch_timeout(), None);
    }

    #[test]
    fn test_partial_json() {
        let config: ScannerConfig = serde_json::from_str(r#"{"fetch_timeout_ms": 250}"#).unwrap();
        assert_eq!(config.interval_ms, 5000);
        assert_eq!(config.fetch_timeout(), Some(Duration::from_millis(250)));
    }

    #[test]
    fn test_oversized_durations_saturate() {
        let config = ScannerConfig::default()
            .with_interval(Duration::MAX)
            .with_fetch_timeout(Duration::MAX);
        assert_eq!(config.interval_ms, u64::MAX);
        assert_eq!(config.fetch_timeout_ms, Some(u64::MAX));

        let config = ScannerConfig::default().with_interval(Duration::from_micros(1_500));
        assert_eq!(config.interval_ms, 1);
    }
}

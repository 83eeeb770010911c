//! Latent link scanner and discovery cache parameters.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Background scanner control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerParams {
    /// Start scanning as soon as the host is built.
    pub enabled: bool,
    /// Time between scan ticks.
    pub interval: Duration,
    /// Scans are skipped until the corpus holds more topics than this.
    pub min_corpus: usize,
    /// Fraction of eligible pairs discarded before the generator is asked.
    pub scarcity: f64,
}

impl Default for ScannerParams {
    fn default() -> Self {
        Self {
            enabled: false,
            interval: Duration::from_millis(3000),
            min_corpus: 5,
            scarcity: 0.7,
        }
    }
}

impl ScannerParams {
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_min_corpus(mut self, min: usize) -> Self {
        self.min_corpus = min;
        self
    }

    pub fn with_scarcity(mut self, scarcity: f64) -> Self {
        self.scarcity = scarcity.clamp(0.0, 1.0);
        self
    }
}

/// Discovery cache parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryParams {
    /// How long a cached discovery result is served.
    pub ttl: Duration,
    /// Topics requested when the caller does not say.
    pub default_count: usize,
}

impl Default for DiscoveryParams {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(600),
            default_count: 5,
        }
    }
}

impl DiscoveryParams {
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn with_default_count(mut self, count: usize) -> Self {
        self.default_count = count;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scanner_defaults() {
        let params = ScannerParams::default();
        assert!(!params.enabled);
        assert_eq!(params.interval, Duration::from_secs(3));
        assert_eq!(params.min_corpus, 5);
        assert_eq!(params.scarcity, 0.7);
    }

    #[test]
    fn test_scarcity_is_clamped() {
        assert_eq!(ScannerParams::default().with_scarcity(-1.0).scarcity, 0.0);
        assert_eq!(ScannerParams::default().with_scarcity(2.0).scarcity, 1.0);
    }

    #[test]
    fn test_discovery_defaults() {
        let params = DiscoveryParams::default();
        assert_eq!(params.ttl, Duration::from_secs(600));
        assert_eq!(params.default_count, 5);
    }
}

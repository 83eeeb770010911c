//! Scanner and discovery configuration from TOML (`[scanner]`, `[discovery]`)

use salon_application::{DiscoveryParams, ScannerParams};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Raw latent link scanner configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileScannerConfig {
    pub enabled: bool,
    pub interval_ms: u64,
    pub min_corpus: usize,
    pub scarcity: f64,
}

impl Default for FileScannerConfig {
    fn default() -> Self {
        let params = ScannerParams::default();
        Self {
            enabled: params.enabled,
            interval_ms: params.interval.as_millis() as u64,
            min_corpus: params.min_corpus,
            scarcity: params.scarcity,
        }
    }
}

impl FileScannerConfig {
    pub fn to_params(&self) -> ScannerParams {
        ScannerParams::default()
            .with_enabled(self.enabled)
            .with_interval(Duration::from_millis(self.interval_ms))
            .with_min_corpus(self.min_corpus)
            .with_scarcity(self.scarcity)
    }
}

/// Raw discovery cache configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDiscoveryConfig {
    pub ttl_seconds: u64,
    pub default_count: usize,
}

impl Default for FileDiscoveryConfig {
    fn default() -> Self {
        let params = DiscoveryParams::default();
        Self {
            ttl_seconds: params.ttl.as_secs(),
            default_count: params.default_count,
        }
    }
}

impl FileDiscoveryConfig {
    pub fn to_params(&self) -> DiscoveryParams {
        DiscoveryParams::default()
            .with_ttl(Duration::from_secs(self.ttl_seconds))
            .with_default_count(self.default_count)
    }
}

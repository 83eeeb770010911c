//! SalonConfig: container for everything the session host needs.

use super::{BehaviorConfig, DiscoveryParams, ScannerParams, SalonParams};

/// Application configuration handed to
/// [`SalonHost`](crate::use_cases::salon_host::SalonHost).
///
/// Built by the CLI from the loaded file configuration.
#[derive(Debug, Clone, Default)]
pub struct SalonConfig {
    pub salon: SalonParams,
    pub scanner: ScannerParams,
    pub discovery: DiscoveryParams,
    pub behavior: BehaviorConfig,
}

impl SalonConfig {
    pub fn with_salon(mut self, salon: SalonParams) -> Self {
        self.salon = salon;
        self
    }

    pub fn with_scanner(mut self, scanner: ScannerParams) -> Self {
        self.scanner = scanner;
        self
    }

    pub fn with_discovery(mut self, discovery: DiscoveryParams) -> Self {
        self.discovery = discovery;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }
}

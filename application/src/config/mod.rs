//! Application-level configuration.
//!
//! This module provides configuration types that control how use cases behave:
//!
//! - [`SalonParams`]: lobby pacing and turn loop control
//! - [`ScannerParams`] / [`DiscoveryParams`]: background scanning and discovery caching
//! - [`BehaviorConfig`]: generation timeouts
//! - [`SalonConfig`]: container for all of the above

pub mod behavior;
pub mod salon_config;
pub mod salon_params;
pub mod scanner_params;

pub use behavior::BehaviorConfig;
pub use salon_config::SalonConfig;
pub use salon_params::{INSIGHT_LABELS, SalonParams};
pub use scanner_params::{DiscoveryParams, ScannerParams};

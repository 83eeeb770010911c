//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application parameters.

mod generator;
mod output;
mod salon;
mod scanner;

pub use generator::FileGeneratorConfig;
pub use output::{FileLoggingConfig, FileOutputConfig, FileOutputFormat};
pub use salon::FileSalonConfig;
pub use scanner::{FileDiscoveryConfig, FileScannerConfig};

use salon_application::{BehaviorConfig, SalonConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("{0} cannot be 0")]
    ZeroValue(&'static str),

    #[error("salon.progress_min ({min}) is greater than salon.progress_max ({max})")]
    InvertedProgressRange { min: u8, max: u8 },

    #[error("salon.progress_max cannot exceed 100 (got {0})")]
    ProgressAboveComplete(u8),

    #[error("salon.message_cap must be at least 2 (got {0})")]
    MessageCapTooSmall(usize),

    #[error("{field} must be within [0, 1] (got {value})")]
    OutOfUnitRange { field: &'static str, value: f64 },

    #[error("generator.{0} cannot be empty")]
    EmptyGeneratorField(&'static str),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub generator: FileGeneratorConfig,
    pub salon: FileSalonConfig,
    pub scanner: FileScannerConfig,
    pub discovery: FileDiscoveryConfig,
    pub logging: FileLoggingConfig,
    pub output: FileOutputConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.generator.api_key_env.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyGeneratorField("api_key_env"));
        }
        if self.generator.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyGeneratorField("model"));
        }

        if self.salon.emergence_interval == 0 {
            issues.push(ConfigValidationError::ZeroValue("salon.emergence_interval"));
        }
        if self.salon.progress_min > self.salon.progress_max {
            issues.push(ConfigValidationError::InvertedProgressRange {
                min: self.salon.progress_min,
                max: self.salon.progress_max,
            });
        }
        if self.salon.progress_max > 100 {
            issues.push(ConfigValidationError::ProgressAboveComplete(
                self.salon.progress_max,
            ));
        }
        if self.salon.message_cap < 2 {
            issues.push(ConfigValidationError::MessageCapTooSmall(
                self.salon.message_cap,
            ));
        }
        if !(0.0..=1.0).contains(&self.salon.insight_label_chance) {
            issues.push(ConfigValidationError::OutOfUnitRange {
                field: "salon.insight_label_chance",
                value: self.salon.insight_label_chance,
            });
        }

        if self.scanner.interval_ms == 0 {
            issues.push(ConfigValidationError::ZeroValue("scanner.interval_ms"));
        }
        if !(0.0..=1.0).contains(&self.scanner.scarcity) {
            issues.push(ConfigValidationError::OutOfUnitRange {
                field: "scanner.scarcity",
                value: self.scanner.scarcity,
            });
        }

        if self.discovery.ttl_seconds == 0 {
            issues.push(ConfigValidationError::ZeroValue("discovery.ttl_seconds"));
        }
        if self.discovery.default_count == 0 {
            issues.push(ConfigValidationError::ZeroValue("discovery.default_count"));
        }

        issues
    }

    /// Convert into the parameters the application layer runs with.
    pub fn to_salon_config(&self) -> SalonConfig {
        SalonConfig::default()
            .with_salon(self.salon.to_params())
            .with_scanner(self.scanner.to_params())
            .with_discovery(self.discovery.to_params())
            .with_behavior(BehaviorConfig::from_timeout_seconds(Some(
                self.generator.timeout_seconds,
            )))
    }
}

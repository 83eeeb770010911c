//! Configuration file loading for tier-salon
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `SALON_` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./salon.toml` or `./.salon.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/tier-salon/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileDiscoveryConfig, FileGeneratorConfig,
    FileLoggingConfig, FileOutputConfig, FileOutputFormat, FileSalonConfig, FileScannerConfig,
};
pub use loader::ConfigLoader;

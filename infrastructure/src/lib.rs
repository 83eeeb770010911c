//! Infrastructure layer for tier-salon
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod corpus;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileGeneratorConfig, FileOutputConfig,
    FileOutputFormat,
};
pub use corpus::{InMemoryCorpus, SeedError, SeedLoader};
pub use gemini::GeminiContentGenerator;
pub use logging::JsonlConversationLogger;

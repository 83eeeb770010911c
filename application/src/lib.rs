//! Application layer for tier-salon
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{BehaviorConfig, DiscoveryParams, SalonConfig, SalonParams, ScannerParams};
pub use ports::{
    content_generator::{ContentGenerator, GenerationError, TimeoutGenerator},
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    corpus::TopicCorpus,
    observer::{NoObserver, SalonObserver},
};
pub use use_cases::detect_emergence::EmergenceDetector;
pub use use_cases::discover_topics::{DiscoveryCache, DiscoveryRequest};
pub use use_cases::fuse_topics::FuseTopicsUseCase;
pub use use_cases::run_salon::{
    PLACEHOLDER, RunSalonError, RunSalonInput, RunSalonOutput, RunSalonUseCase, SalonOutcome,
};
pub use use_cases::salon_host::{SalonHost, SalonHostError};
pub use use_cases::scan_latent_links::{LatentLinkScanner, ScanOutcome};

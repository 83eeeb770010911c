//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod content_generator;
pub mod conversation_logger;
pub mod corpus;
pub mod observer;

//! Salon session domain.
//!
//! - [`entities::Session`]: one deliberation: topic, roster, transcript, lifecycle
//! - [`entities::Message`]: a single transcript entry
//! - [`registry::ParticipantRegistry`]: roster and per-participant status
//! - [`progress::Crystallization`]: monotone progress metric

pub mod entities;
pub mod progress;
pub mod registry;

//! Domain layer for tier-salon
//!
//! This crate contains the core entities, value objects and pure logic of the
//! salon. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Salon
//!
//! A salon is a multi-party deliberation: a roster of agents take turns
//! adding to a shared transcript about a [`Topic`] until the group either
//! crystallizes a new synthesized topic or runs out of turns.
//!
//! ## Corpus
//!
//! Topics are immutable and only ever appended: seeded at startup, produced
//! by discovery, fusion or emergence. Latent links connect topics of
//! different [`Category`]s.

pub mod core;
pub mod link;
pub mod participant;
pub mod prompt;
pub mod session;
pub mod topic;
pub mod util;

// Re-export commonly used types
pub use core::{category::Category, error::DomainError};
pub use link::entities::{LatentLink, LinkSet, TopicPair};
pub use participant::{
    entities::{BehaviorStats, Participant, ParticipantId, ParticipantState, ParticipantStatus, Role},
    personas::{GUEST_PERSONAS, GuestPersona, HOST_ID},
};
pub use prompt::{
    parsing::{
        TopicDraft, is_negative_sentinel, parse_discovery_response, parse_emergence_response,
        parse_fusion_response, parse_latent_insight,
    },
    template::PromptTemplate,
};
pub use session::{
    entities::{Message, Session, SessionId, SessionState, TerminationReason},
    progress::Crystallization,
    registry::ParticipantRegistry,
};
pub use topic::entities::{Topic, TopicId};

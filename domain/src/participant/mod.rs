//! Participant domain: who takes part in a salon.
//!
//! - [`entities::Participant`]: an agent seated in a session
//! - [`entities::ParticipantStatus`]: connection / speaking status
//! - [`personas`]: the Host persona and the guest persona pool

pub mod entities;
pub mod personas;

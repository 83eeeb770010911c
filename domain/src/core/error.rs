//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid session transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Unknown participant: {0}")]
    UnknownParticipant(String),

    #[error("Participant {participant} cannot go from {from} to {to}")]
    InvalidStatusTransition {
        participant: String,
        from: String,
        to: String,
    },

    #[error("Participant already seated: {0}")]
    DuplicateParticipant(String),

    #[error("A user participant is already seated: {0}")]
    DuplicateUser(String),

    #[error("Session is not active (state: {0})")]
    SessionNotActive(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),
}

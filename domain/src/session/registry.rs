//! Participant registry: the roster of one session and its status bookkeeping.

use crate::core::error::DomainError;
use crate::participant::entities::{
    Participant, ParticipantId, ParticipantState, ParticipantStatus, Role,
};

/// Roster of a single session.
///
/// Invariants:
/// - at most one participant is `speaking` at any time
/// - at most one participant is flagged `is_user`
/// - participants are never removed; once closed the roster ignores additions
#[derive(Debug, Clone, Default)]
pub struct ParticipantRegistry {
    states: Vec<ParticipantState>,
    closed: bool,
}

impl ParticipantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a participant.
    ///
    /// The Host starts `online`; everyone else starts `connecting`.
    /// Returns `Ok(false)` without changes when the roster is closed.
    pub fn add(&mut self, participant: Participant) -> Result<bool, DomainError> {
        if self.closed {
            return Ok(false);
        }
        if self.get(&participant.id).is_some() {
            return Err(DomainError::DuplicateParticipant(
                participant.id.to_string(),
            ));
        }
        if participant.is_user
            && let Some(user) = self.user()
        {
            return Err(DomainError::DuplicateUser(user.id.to_string()));
        }

        let status = match participant.role {
            Role::Host => ParticipantStatus::Online,
            _ => ParticipantStatus::Connecting,
        };
        self.states.push(ParticipantState {
            participant,
            status,
        });
        Ok(true)
    }

    /// Change a participant's status.
    ///
    /// Moving someone to `speaking` forces every other participant `online`.
    pub fn set_status(
        &mut self,
        id: &ParticipantId,
        status: ParticipantStatus,
    ) -> Result<(), DomainError> {
        let index = self
            .states
            .iter()
            .position(|s| &s.participant.id == id)
            .ok_or_else(|| DomainError::UnknownParticipant(id.to_string()))?;

        let current = self.states[index].status;
        if !current.can_transition_to(status) {
            return Err(DomainError::InvalidStatusTransition {
                participant: id.to_string(),
                from: current.to_string(),
                to: status.to_string(),
            });
        }

        if status == ParticipantStatus::Speaking {
            for (i, state) in self.states.iter_mut().enumerate() {
                if i != index {
                    state.status = ParticipantStatus::Online;
                }
            }
        }
        self.states[index].status = status;
        Ok(())
    }

    /// Put every participant back to `online`.
    pub fn reset_online(&mut self) {
        for state in &mut self.states {
            state.status = ParticipantStatus::Online;
        }
    }

    /// All participants except the one with the given identity.
    pub fn list_excluding(&self, id: Option<&ParticipantId>) -> Vec<&Participant> {
        self.states
            .iter()
            .map(|s| &s.participant)
            .filter(|p| Some(&p.id) != id)
            .collect()
    }

    pub fn get(&self, id: &ParticipantId) -> Option<&ParticipantState> {
        self.states.iter().find(|s| &s.participant.id == id)
    }

    pub fn user(&self) -> Option<&Participant> {
        self.states
            .iter()
            .map(|s| &s.participant)
            .find(|p| p.is_user)
    }

    pub fn speaking(&self) -> Option<&Participant> {
        self.states
            .iter()
            .find(|s| s.status == ParticipantStatus::Speaking)
            .map(|s| &s.participant)
    }

    pub fn all_online(&self) -> bool {
        self.states
            .iter()
            .all(|s| s.status == ParticipantStatus::Online)
    }

    pub fn states(&self) -> &[ParticipantState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Stop accepting new participants.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

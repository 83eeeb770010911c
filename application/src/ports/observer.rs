//! Salon observer port
//!
//! Defines the callbacks a session host receives while a salon runs.

use salon_domain::{Message, Participant, ParticipantState, SessionState, TerminationReason, Topic};

/// Callback for status updates during a salon
///
/// Implementations live in the presentation layer and can display the
/// salon in various ways (console, web UI, etc.). Every method has a no-op
/// default so observers only implement what they render.
pub trait SalonObserver: Send + Sync {
    /// Called whenever a participant joins or changes status.
    fn on_roster_changed(&self, _roster: &[ParticipantState]) {}

    /// Called on every lifecycle transition.
    fn on_state_changed(&self, _state: SessionState) {}

    /// Called for every message appended to the transcript.
    fn on_message(&self, _message: &Message, _speaker: &Participant) {}

    /// Called when crystallization progress advances.
    fn on_progress(&self, _progress: u8) {}

    /// Called once when the session reaches its terminal state.
    fn on_completed(&self, _reason: TerminationReason, _emerged: Option<&Topic>) {}
}

/// No-op observer for when status reporting is not needed
pub struct NoObserver;

impl SalonObserver for NoObserver {}

//! Session domain entities

use crate::core::error::DomainError;
use crate::participant::entities::{Participant, ParticipantId};
use crate::session::progress::Crystallization;
use crate::session::registry::ParticipantRegistry;
use crate::topic::entities::Topic;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a salon session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(format!("salon-{}", uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A transcript entry (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub speaker: ParticipantId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insight_label: Option<String>,
}

impl Message {
    pub fn new(speaker: ParticipantId, content: impl Into<String>) -> Self {
        Self {
            id: format!("msg-{}", uuid::Uuid::new_v4()),
            speaker,
            content: content.into(),
            timestamp: Utc::now(),
            insight_label: None,
        }
    }

    pub fn with_label(mut self, label: Option<String>) -> Self {
        self.insight_label = label;
        self
    }
}

/// Lifecycle of a session.
///
/// `Lobby -> Active -> Completed`; a session may also be closed straight from
/// the lobby. `Completed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Lobby,
    Active,
    Completed,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Lobby => "LOBBY",
            SessionState::Active => "ACTIVE",
            SessionState::Completed => "COMPLETED",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Completed)
    }

    pub fn can_transition_to(&self, next: SessionState) -> bool {
        matches!(
            (self, next),
            (SessionState::Lobby, SessionState::Active)
                | (SessionState::Lobby, SessionState::Completed)
                | (SessionState::Active, SessionState::Completed)
        )
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Why a session reached `Completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminationReason {
    /// The emergence detector produced a synthesized topic.
    Emergence,
    /// Crystallization progress reached 100 without a synthesized topic.
    ProgressComplete,
    /// The transcript reached the hard message cap.
    MessageCap,
    /// The session host aborted the session.
    Aborted,
}

impl TerminationReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminationReason::Emergence => "emergence",
            TerminationReason::ProgressComplete => "progress_complete",
            TerminationReason::MessageCap => "message_cap",
            TerminationReason::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One deliberation about a topic (Entity)
///
/// The transcript is append-only and only grows while the session is active.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    topic: Topic,
    registry: ParticipantRegistry,
    transcript: Vec<Message>,
    state: SessionState,
    progress: Crystallization,
    termination: Option<TerminationReason>,
}

impl Session {
    pub fn new(topic: Topic) -> Self {
        Self::with_id(SessionId::generate(), topic)
    }

    pub fn with_id(id: SessionId, topic: Topic) -> Self {
        Self {
            id,
            topic,
            registry: ParticipantRegistry::new(),
            transcript: Vec::new(),
            state: SessionState::Lobby,
            progress: Crystallization::default(),
            termination: None,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn topic(&self) -> &Topic {
        &self.topic
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn registry(&self) -> &ParticipantRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ParticipantRegistry {
        &mut self.registry
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn progress(&self) -> Crystallization {
        self.progress
    }

    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    /// Seat a participant. A no-op once the session is completed.
    pub fn add_participant(&mut self, participant: Participant) -> Result<bool, DomainError> {
        if self.state.is_terminal() {
            return Ok(false);
        }
        self.registry.add(participant)
    }

    /// `Lobby -> Active`, opening the transcript with `opening`.
    pub fn activate(&mut self, opening: Message) -> Result<(), DomainError> {
        self.transition(SessionState::Active)?;
        self.append(opening)
    }

    /// Append a message spoken by a seated participant.
    pub fn append(&mut self, message: Message) -> Result<(), DomainError> {
        if self.state != SessionState::Active {
            return Err(DomainError::SessionNotActive(self.state.to_string()));
        }
        if self.registry.get(&message.speaker).is_none() {
            return Err(DomainError::UnknownParticipant(message.speaker.to_string()));
        }
        self.transcript.push(message);
        Ok(())
    }

    /// Move to `Completed`, optionally appending a closing message first.
    pub fn complete(
        &mut self,
        reason: TerminationReason,
        closing: Option<Message>,
    ) -> Result<(), DomainError> {
        if let Some(message) = closing
            && self.state == SessionState::Active
        {
            self.append(message)?;
        }
        self.transition(SessionState::Completed)?;
        self.termination = Some(reason);
        self.registry.reset_online();
        self.registry.close();
        Ok(())
    }

    /// Advance crystallization progress; returns the new value.
    pub fn advance_progress(&mut self, delta: u8) -> u8 {
        self.progress.advance(delta)
    }

    pub fn last_speaker(&self) -> Option<&ParticipantId> {
        self.transcript.last().map(|m| &m.speaker)
    }

    /// Participants allowed to take the next turn.
    pub fn eligible_speakers(&self) -> Vec<&Participant> {
        self.registry.list_excluding(self.last_speaker())
    }

    /// Number of messages produced by turns (the opening is not a turn).
    pub fn turn_count(&self) -> usize {
        self.transcript.len().saturating_sub(1)
    }

    /// Transcript rendered as a speaker-labelled script.
    pub fn render_script(&self) -> String {
        self.transcript
            .iter()
            .map(|m| {
                let name = self
                    .registry
                    .get(&m.speaker)
                    .map(|s| s.participant.name.as_str())
                    .unwrap_or(m.speaker.as_str());
                format!("{}: {}", name, m.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn transition(&mut self, next: SessionState) -> Result<(), DomainError> {
        if !self.state.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                from: self.state.to_string(),
                to: next.to_string(),
            });
        }
        self.state = next;
        Ok(())
    }
}

//! Participant entities and value objects

use crate::util::clip_bytes;
use serde::{Deserialize, Serialize};

/// Bytes of knowledge-base text rendered into a persona descriptor.
const KNOWLEDGE_EXCERPT_BYTES: usize = 100;

/// Identity of a Participant within a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh identity with the given prefix.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for ParticipantId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Seat a participant occupies in the salon.
///
/// `Critic`, `Visionary`, `Skeptic` and `Synthesizer` are reserved for
/// extension personas; the orchestrator does not weight turns by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Host,
    UserEnvoy,
    Guest,
    Critic,
    Visionary,
    Skeptic,
    Synthesizer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Host => "HOST",
            Role::UserEnvoy => "USER_ENVOY",
            Role::Guest => "GUEST",
            Role::Critic => "CRITIC",
            Role::Visionary => "VISIONARY",
            Role::Skeptic => "SKEPTIC",
            Role::Synthesizer => "SYNTHESIZER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Behaviour modifiers for a participant, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorStats {
    /// 0 = cautious, 1 = reckless
    pub risk_tolerance: f32,
    /// 0 = logic only, 1 = abstract / metaphorical
    pub creativity_bias: f32,
}

impl BehaviorStats {
    pub fn new(risk_tolerance: f32, creativity_bias: f32) -> Self {
        Self {
            risk_tolerance: risk_tolerance.clamp(0.0, 1.0),
            creativity_bias: creativity_bias.clamp(0.0, 1.0),
        }
    }
}

impl Default for BehaviorStats {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

/// An agent seated in a salon (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
    pub role: Role,
    /// Free-text persona / behaviour descriptor.
    pub persona: String,
    #[serde(default)]
    pub is_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<BehaviorStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base: Option<String>,
}

impl Participant {
    pub fn new(
        id: impl Into<ParticipantId>,
        name: impl Into<String>,
        role: Role,
        persona: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            persona: persona.into(),
            is_user: false,
            stats: None,
            knowledge_base: None,
        }
    }

    /// Build the user's envoy from what they told us about it.
    pub fn envoy(
        name: impl Into<String>,
        role_description: &str,
        stats: BehaviorStats,
        knowledge_base: Option<String>,
    ) -> Self {
        let name = name.into();
        let persona = format!(
            "You are {}, a {}. Argue from your own expertise and challenge weak reasoning.",
            name, role_description
        );
        Self {
            id: ParticipantId::generate("envoy"),
            name,
            role: Role::UserEnvoy,
            persona,
            is_user: true,
            stats: Some(stats),
            knowledge_base: knowledge_base.filter(|kb| !kb.trim().is_empty()),
        }
    }

    pub fn with_stats(mut self, stats: BehaviorStats) -> Self {
        self.stats = Some(stats);
        self
    }

    pub fn as_user(mut self) -> Self {
        self.is_user = true;
        self
    }

    /// Render the persona descriptor handed to the content generator.
    pub fn persona_prompt(&self) -> String {
        let mut prompt = format!(
            "YOU ARE: \"{}\".\nYOUR INTERNAL PROMPT:\n\"{}\"",
            self.name, self.persona
        );

        if let Some(stats) = &self.stats {
            prompt.push_str(&format!(
                "\nBEHAVIOR MODIFIERS:\n- Risk Tolerance: {:.2} (0=Cautious, 1=Reckless)\n- Creativity: {:.2} (0=Logic-only, 1=Abstract/Metaphorical)",
                stats.risk_tolerance, stats.creativity_bias
            ));
        }

        if let Some(kb) = &self.knowledge_base {
            prompt.push_str(&format!(
                "\n- Knowledge Base to reference: \"{}...\"",
                clip_bytes(kb, KNOWLEDGE_EXCERPT_BYTES)
            ));
        }

        prompt
    }
}

/// Connection / speaking status of a seated participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticipantStatus {
    Connecting,
    Online,
    Speaking,
}

impl ParticipantStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantStatus::Connecting => "connecting",
            ParticipantStatus::Online => "online",
            ParticipantStatus::Speaking => "speaking",
        }
    }

    /// Whether moving from `self` to `next` is allowed.
    ///
    /// `connecting -> online` happens once; afterwards a participant only
    /// oscillates between `online` and `speaking`. Same-state moves are no-ops.
    pub fn can_transition_to(&self, next: ParticipantStatus) -> bool {
        use ParticipantStatus::*;
        match (*self, next) {
            (a, b) if a == b => true,
            (Connecting, Online) | (Online, Speaking) | (Speaking, Online) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for ParticipantStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Participant together with its current status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantState {
    pub participant: Participant,
    pub status: ParticipantStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envoy_is_user_with_stats() {
        let envoy = Participant::envoy(
            "Commander Vega",
            "quantum biologist",
            BehaviorStats::new(0.8, 0.3),
            Some("   ".to_string()),
        );
        assert!(envoy.is_user);
        assert_eq!(envoy.role, Role::UserEnvoy);
        assert!(envoy.knowledge_base.is_none());
        assert!(envoy.persona.contains("quantum biologist"));
    }

    #[test]
    fn test_stats_are_clamped() {
        let stats = BehaviorStats::new(1.7, -0.2);
        assert_eq!(stats.risk_tolerance, 1.0);
        assert_eq!(stats.creativity_bias, 0.0);
    }

    #[test]
    fn test_persona_prompt_includes_modifiers_and_truncated_knowledge() {
        let kb = "x".repeat(300);
        let envoy = Participant::envoy("Vega", "chemist", BehaviorStats::default(), Some(kb));
        let prompt = envoy.persona_prompt();
        assert!(prompt.contains("Risk Tolerance: 0.50"));
        assert!(prompt.contains(&format!("\"{}...\"", "x".repeat(100))));
        assert!(!prompt.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_persona_prompt_without_stats() {
        let guest = Participant::new("g", "Terra", Role::Guest, "An environmental crusader.");
        let prompt = guest.persona_prompt();
        assert!(prompt.contains("\"Terra\""));
        assert!(!prompt.contains("BEHAVIOR MODIFIERS"));
    }

    #[test]
    fn test_status_transitions() {
        use ParticipantStatus::*;
        assert!(Connecting.can_transition_to(Online));
        assert!(Online.can_transition_to(Speaking));
        assert!(Speaking.can_transition_to(Online));
        assert!(Online.can_transition_to(Online));
        assert!(!Online.can_transition_to(Connecting));
        assert!(!Speaking.can_transition_to(Connecting));
        assert!(!Connecting.can_transition_to(Speaking));
    }
}

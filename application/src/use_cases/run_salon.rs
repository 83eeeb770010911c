//! Run Salon use case
//!
//! Orchestrates one salon from an empty lobby to a terminal state: seats the
//! Host, the user's envoy and a handful of guests, then runs a strictly
//! sequential turn loop until an emergent topic crystallizes, the message cap
//! is hit, or crystallization progress reaches 100.

use crate::config::{INSIGHT_LABELS, SalonParams};
use crate::ports::content_generator::ContentGenerator;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::corpus::TopicCorpus;
use crate::ports::observer::{NoObserver, SalonObserver};
use crate::use_cases::detect_emergence::EmergenceDetector;
use crate::use_cases::shared::{cancellable, lock, pause};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use salon_domain::participant::personas::host;
use salon_domain::{
    DomainError, GUEST_PERSONAS, Message, Participant, ParticipantId, ParticipantStatus, Session,
    SessionId, TerminationReason, Topic,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

/// Spoken in place of a turn whose generation call failed.
pub const PLACEHOLDER: &str = "...";

const CAP_CLOSING: &str =
    "We have reached the time limit for this session. Let us reflect on what we have shared.";
const PROGRESS_CLOSING: &str = "Crystallization complete. Artifact generated: Consensus Data.";

/// Errors that can occur during a salon
///
/// Generation failures never surface here; they are absorbed turn by turn.
#[derive(Error, Debug)]
pub enum RunSalonError {
    #[error("Session state error: {0}")]
    Domain(#[from] DomainError),
}

/// How a salon run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SalonOutcome {
    /// The session reached `COMPLETED`.
    Completed {
        reason: TerminationReason,
        emerged: Option<Topic>,
    },
    /// No participant was eligible to speak; the session stays `ACTIVE`.
    Stalled,
}

/// Input for the RunSalon use case
#[derive(Debug)]
pub struct RunSalonInput {
    pub session_id: SessionId,
    pub topic: Topic,
    /// The user's envoy. `None` runs the salon with the Host and guests only.
    pub user: Option<Participant>,
    /// Text the user wants spoken verbatim on their next turn.
    pub interjections: Option<mpsc::UnboundedReceiver<String>>,
}

impl RunSalonInput {
    pub fn new(topic: Topic, user: Participant) -> Self {
        Self {
            session_id: SessionId::generate(),
            topic,
            user: Some(user.as_user()),
            interjections: None,
        }
    }

    pub fn spectator(topic: Topic) -> Self {
        Self {
            session_id: SessionId::generate(),
            topic,
            user: None,
            interjections: None,
        }
    }

    pub fn with_session_id(mut self, id: SessionId) -> Self {
        self.session_id = id;
        self
    }

    pub fn with_interjections(mut self, rx: mpsc::UnboundedReceiver<String>) -> Self {
        self.interjections = Some(rx);
        self
    }
}

/// Output of a salon run
#[derive(Debug, Clone)]
pub struct RunSalonOutput {
    pub session: Session,
    pub outcome: SalonOutcome,
}

impl RunSalonOutput {
    pub fn emerged(&self) -> Option<&Topic> {
        match &self.outcome {
            SalonOutcome::Completed { emerged, .. } => emerged.as_ref(),
            SalonOutcome::Stalled => None,
        }
    }
}

/// Per-run mutable state that is not part of the Session itself.
struct Turns<'a> {
    session: Session,
    observer: &'a dyn SalonObserver,
    cancellation: CancellationToken,
    interjections: Option<mpsc::UnboundedReceiver<String>>,
    pending: VecDeque<String>,
}

impl Turns<'_> {
    fn notify_roster(&self) {
        self.observer
            .on_roster_changed(self.session.registry().states());
    }

    fn drain_interjections(&mut self) {
        if let Some(rx) = self.interjections.as_mut() {
            while let Ok(text) = rx.try_recv() {
                let text = text.trim().to_string();
                if !text.is_empty() {
                    self.pending.push_back(text);
                }
            }
        }
    }
}

/// Use case for running a salon
pub struct RunSalonUseCase<G: ContentGenerator + 'static> {
    generator: Arc<G>,
    detector: EmergenceDetector<G>,
    params: SalonParams,
    corpus: Option<Arc<dyn TopicCorpus>>,
    logger: Arc<dyn ConversationLogger>,
    rng: Mutex<StdRng>,
}

impl<G: ContentGenerator + 'static> RunSalonUseCase<G> {
    pub fn new(generator: Arc<G>, params: SalonParams) -> Self {
        Self {
            detector: EmergenceDetector::new(Arc::clone(&generator)),
            generator,
            params,
            corpus: None,
            logger: Arc::new(NoConversationLogger),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Emergent topics are appended to this corpus.
    pub fn with_corpus(mut self, corpus: Arc<dyn TopicCorpus>) -> Self {
        self.corpus = Some(corpus);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    /// Execute the use case with no observer and no way to abort
    pub async fn execute(&self, input: RunSalonInput) -> Result<RunSalonOutput, RunSalonError> {
        self.execute_with_progress(input, &NoObserver, CancellationToken::new())
            .await
    }

    /// Execute the use case with observer callbacks and cancellation
    ///
    /// Cancelling the token completes the session with
    /// [`TerminationReason::Aborted`]; no generation call starts afterwards.
    pub async fn execute_with_progress(
        &self,
        input: RunSalonInput,
        observer: &dyn SalonObserver,
        cancellation: CancellationToken,
    ) -> Result<RunSalonOutput, RunSalonError> {
        let mut turns = Turns {
            session: Session::with_id(input.session_id, input.topic),
            observer,
            cancellation,
            interjections: input.interjections,
            pending: VecDeque::new(),
        };
        info!(
            session = %turns.session.id(),
            "Salon created on \"{}\"",
            turns.session.topic().title
        );

        let user_name = input.user.as_ref().map(|u| u.name.clone());
        if !self.fill_lobby(&mut turns, input.user).await? {
            return self.abort(turns);
        }

        let opening = Message::new(host().id, opening_line(&turns.session.topic().title, user_name.as_deref()));
        turns.session.activate(opening)?;
        observer.on_state_changed(turns.session.state());
        self.publish_last_message(&turns);

        self.run_turns(turns).await
    }

    /// Seat the Host, the user and the guests.
    ///
    /// Everyone who is still connecting comes online one beat after the next
    /// arrival. Returns `false` if cancelled while waiting.
    async fn fill_lobby(
        &self,
        turns: &mut Turns<'_>,
        user: Option<Participant>,
    ) -> Result<bool, RunSalonError> {
        turns.session.add_participant(host())?;
        if let Some(user) = user {
            turns.session.add_participant(user)?;
        }
        turns.notify_roster();

        let guests: Vec<Participant> = {
            let mut rng = lock(&self.rng);
            GUEST_PERSONAS
                .choose_multiple(&mut *rng, self.params.guest_count)
                .map(|g| g.to_participant())
                .collect()
        };

        for guest in guests {
            if !pause(self.params.join_interval, &turns.cancellation).await {
                return Ok(false);
            }
            self.connect_pending(turns)?;
            debug!(session = %turns.session.id(), "Guest joined: {}", guest.name);
            turns.session.add_participant(guest)?;
            turns.notify_roster();
        }

        if !pause(self.params.connect_delay, &turns.cancellation).await {
            return Ok(false);
        }
        self.connect_pending(turns)?;
        info!(
            session = %turns.session.id(),
            "Lobby filled with {} participants",
            turns.session.registry().len()
        );
        Ok(true)
    }

    fn connect_pending(&self, turns: &mut Turns<'_>) -> Result<(), RunSalonError> {
        let connecting: Vec<_> = turns
            .session
            .registry()
            .states()
            .iter()
            .filter(|s| s.status == ParticipantStatus::Connecting)
            .map(|s| s.participant.id.clone())
            .collect();
        if connecting.is_empty() {
            return Ok(());
        }
        for id in &connecting {
            turns
                .session
                .registry_mut()
                .set_status(id, ParticipantStatus::Online)?;
        }
        turns.notify_roster();
        Ok(())
    }

    async fn run_turns(&self, mut turns: Turns<'_>) -> Result<RunSalonOutput, RunSalonError> {
        let k = self.params.emergence_interval.max(1);

        loop {
            if turns.cancellation.is_cancelled() {
                return self.abort(turns);
            }

            // 1-3: pick the next speaker
            turns.drain_interjections();
            let Some((speaker, scripted)) = self.select_speaker(&mut turns) else {
                warn!(session = %turns.session.id(), "No eligible speaker; salon stalled");
                return Ok(RunSalonOutput {
                    session: turns.session,
                    outcome: SalonOutcome::Stalled,
                });
            };
            turns
                .session
                .registry_mut()
                .set_status(&speaker.id, ParticipantStatus::Speaking)?;
            turns.notify_roster();

            // 4: pacing
            if !pause(self.params.pacing, &turns.cancellation).await {
                return self.abort(turns);
            }

            // 5: speak
            let content = match scripted {
                Some(text) => {
                    debug!(session = %turns.session.id(), "{} interjects", speaker.name);
                    text
                }
                None => {
                    let persona = speaker.persona_prompt();
                    let context = turns.session.topic().context_line();
                    let script = turns.session.render_script();
                    trace!("Turn prompt for {}:\n{}\n{}", speaker.name, persona, script);
                    let call = self.generator.generate_text(&persona, &context, &script);
                    match cancellable(call, &turns.cancellation).await {
                        None => return self.abort(turns),
                        Some(Ok(text)) if !text.trim().is_empty() => text.trim().to_string(),
                        Some(Ok(_)) => {
                            warn!("Empty turn from {}; using placeholder", speaker.name);
                            PLACEHOLDER.to_string()
                        }
                        Some(Err(e)) => {
                            warn!("Turn generation for {} failed: {}", speaker.name, e);
                            PLACEHOLDER.to_string()
                        }
                    }
                }
            };

            let label = self.pick_label();
            turns
                .session
                .append(Message::new(speaker.id.clone(), content).with_label(label))?;
            turns.session.registry_mut().reset_online();
            turns.notify_roster();
            self.publish_last_message(&turns);

            // 7: progress and emergence every K turns
            let mut emerged = None;
            if turns.session.turn_count() % k == 0 {
                let delta = lock(&self.rng).gen_range(self.params.progress_range());
                let progress = turns.session.advance_progress(delta);
                debug!(session = %turns.session.id(), "Crystallization at {}%", progress);
                turns.observer.on_progress(progress);
                self.logger.log(ConversationEvent::new(
                    "salon_progress",
                    serde_json::json!({
                        "session_id": turns.session.id().as_str(),
                        "progress": progress,
                    }),
                ));

                let check = self
                    .detector
                    .detect(turns.session.transcript(), turns.session.topic());
                match cancellable(check, &turns.cancellation).await {
                    None => return self.abort(turns),
                    Some(found) => emerged = found,
                }
            }

            // 8: termination
            if let Some(topic) = emerged {
                let closing = format!(
                    "EUREKA! A new knowledge capsule has crystallized: {}. The session is adjourned.",
                    topic.title
                );
                if let Some(corpus) = &self.corpus {
                    corpus.append(topic.clone());
                }
                return self.finish(turns, TerminationReason::Emergence, Some(closing), Some(topic));
            }
            if turns.session.transcript().len() >= self.params.message_cap {
                return self.finish(turns, TerminationReason::MessageCap, Some(CAP_CLOSING.to_string()), None);
            }
            if turns.session.progress().is_complete() {
                return self.finish(
                    turns,
                    TerminationReason::ProgressComplete,
                    Some(PROGRESS_CLOSING.to_string()),
                    None,
                );
            }
        }
    }

    /// Choose who speaks next, and whether they speak scripted text.
    ///
    /// A pending interjection makes the user the next speaker whenever they
    /// are eligible; otherwise the speaker is drawn uniformly.
    fn select_speaker(&self, turns: &mut Turns<'_>) -> Option<(Participant, Option<String>)> {
        let eligible = turns.session.eligible_speakers();
        if eligible.is_empty() {
            return None;
        }

        if !turns.pending.is_empty()
            && let Some(user) = eligible.iter().find(|p| p.is_user)
        {
            let user = (*user).clone();
            return Some((user, turns.pending.pop_front()));
        }

        let mut rng = lock(&self.rng);
        eligible.choose(&mut *rng).map(|p| ((*p).clone(), None))
    }

    fn pick_label(&self) -> Option<String> {
        let mut rng = lock(&self.rng);
        if rng.gen_bool(self.params.insight_label_chance.clamp(0.0, 1.0)) {
            INSIGHT_LABELS.choose(&mut *rng).map(|l| l.to_string())
        } else {
            None
        }
    }

    fn publish_last_message(&self, turns: &Turns<'_>) {
        let Some(message) = turns.session.transcript().last() else {
            return;
        };
        let Some(state) = turns.session.registry().get(&message.speaker) else {
            return;
        };
        turns.observer.on_message(message, &state.participant);
        self.logger.log(ConversationEvent::new(
            "salon_message",
            serde_json::json!({
                "session_id": turns.session.id().as_str(),
                "message_id": message.id,
                "speaker": state.participant.name,
                "content": message.content,
                "insight_label": message.insight_label,
            }),
        ));
    }

    fn finish(
        &self,
        mut turns: Turns<'_>,
        reason: TerminationReason,
        closing: Option<String>,
        emerged: Option<Topic>,
    ) -> Result<RunSalonOutput, RunSalonError> {
        let closing = closing.map(|text| Message::new(closing_speaker(&turns.session), text));
        let has_closing = closing.is_some();
        turns.session.complete(reason, closing)?;
        if has_closing {
            self.publish_last_message(&turns);
        }
        turns.notify_roster();
        turns.observer.on_state_changed(turns.session.state());
        turns.observer.on_completed(reason, emerged.as_ref());

        info!(
            session = %turns.session.id(),
            "Salon completed ({}) after {} messages at {}",
            reason,
            turns.session.transcript().len(),
            turns.session.progress()
        );
        self.logger.log(ConversationEvent::new(
            "salon_completed",
            serde_json::json!({
                "session_id": turns.session.id().as_str(),
                "reason": reason.as_str(),
                "messages": turns.session.transcript().len(),
                "progress": turns.session.progress().value(),
                "emerged": emerged.as_ref().map(|t| t.title.clone()),
            }),
        ));

        Ok(RunSalonOutput {
            session: turns.session,
            outcome: SalonOutcome::Completed { reason, emerged },
        })
    }

    fn abort(&self, turns: Turns<'_>) -> Result<RunSalonOutput, RunSalonError> {
        info!(session = %turns.session.id(), "Salon aborted");
        self.finish(turns, TerminationReason::Aborted, None, None)
    }
}

/// The Host announces the close unless the Host spoke last; then the most
/// recent other speaker does, so no speaker follows itself.
fn closing_speaker(session: &Session) -> ParticipantId {
    let host_id = host().id;
    let transcript = session.transcript();
    match transcript.last() {
        Some(last) if last.speaker == host_id => transcript
            .iter()
            .rev()
            .map(|m| &m.speaker)
            .find(|speaker| **speaker != host_id)
            .cloned()
            .unwrap_or(host_id),
        _ => host_id,
    }
}

fn opening_line(title: &str, user: Option<&str>) -> String {
    match user {
        Some(name) => format!(
            "Welcome, distinguished minds. Today we examine \"{}\". {}, you have joined us. Let us begin the dialectic.",
            title, name
        ),
        None => format!(
            "Welcome, distinguished minds. Today we examine \"{}\". Let us begin the dialectic.",
            title
        ),
    }
}

//! Session host: the command surface the UI drives.
//!
//! Owns one instance of every use case, the running sessions and the latent
//! link scanner, and keeps the corpus growing with whatever discovery,
//! fusion and emergence produce.

use crate::config::SalonConfig;
use crate::ports::content_generator::ContentGenerator;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::corpus::TopicCorpus;
use crate::ports::observer::SalonObserver;
use crate::use_cases::discover_topics::{DiscoveryCache, DiscoveryRequest};
use crate::use_cases::fuse_topics::FuseTopicsUseCase;
use crate::use_cases::run_salon::{RunSalonError, RunSalonInput, RunSalonOutput, RunSalonUseCase};
use crate::use_cases::scan_latent_links::LatentLinkScanner;
use crate::use_cases::shared::lock;
use rand::SeedableRng;
use rand::rngs::StdRng;
use salon_domain::{Category, LatentLink, Participant, SessionId, Topic, TopicId, TopicPair};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum SalonHostError {
    #[error("Unknown topic: {0}")]
    UnknownTopic(TopicId),

    #[error("Unknown session: {0}")]
    UnknownSession(SessionId),

    #[error("Salon task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Salon(#[from] RunSalonError),
}

struct SessionHandle {
    cancellation: CancellationToken,
    interjections: mpsc::UnboundedSender<String>,
    /// Taken by [`SalonHost::wait`]; the entry stays so the session can still be aborted.
    task: Option<JoinHandle<Result<RunSalonOutput, RunSalonError>>>,
}

pub struct SalonHost<G: ContentGenerator + 'static> {
    salon: Arc<RunSalonUseCase<G>>,
    discovery: DiscoveryCache<G>,
    fusion: FuseTopicsUseCase<G>,
    scanner: Arc<LatentLinkScanner<G>>,
    corpus: Arc<dyn TopicCorpus>,
    default_count: usize,
    sessions: Mutex<HashMap<SessionId, SessionHandle>>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: ContentGenerator + 'static> SalonHost<G> {
    pub fn new(generator: Arc<G>, corpus: Arc<dyn TopicCorpus>, config: SalonConfig) -> Self {
        Self::from_parts(generator, corpus, config, Arc::new(NoConversationLogger), None)
    }

    pub fn with_logger(
        generator: Arc<G>,
        corpus: Arc<dyn TopicCorpus>,
        config: SalonConfig,
        logger: Arc<dyn ConversationLogger>,
    ) -> Self {
        Self::from_parts(generator, corpus, config, logger, None)
    }

    /// Deterministic host for tests and reproducible runs.
    pub fn seeded(
        generator: Arc<G>,
        corpus: Arc<dyn TopicCorpus>,
        config: SalonConfig,
        seed: u64,
    ) -> Self {
        Self::from_parts(generator, corpus, config, Arc::new(NoConversationLogger), Some(seed))
    }

    /// Full constructor. A `seed` makes speaker selection and scan sampling reproducible.
    ///
    /// With `scanner.enabled` set, the latent scan starts right away; this
    /// needs a Tokio runtime, and is skipped with a warning outside one.
    pub fn from_parts(
        generator: Arc<G>,
        corpus: Arc<dyn TopicCorpus>,
        config: SalonConfig,
        logger: Arc<dyn ConversationLogger>,
        seed: Option<u64>,
    ) -> Self {
        let rng = |offset: u64| match seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(offset)),
            None => StdRng::from_entropy(),
        };

        let salon = RunSalonUseCase::new(Arc::clone(&generator), config.salon)
            .with_corpus(Arc::clone(&corpus))
            .with_logger(Arc::clone(&logger))
            .with_rng(rng(0));
        let autostart = config.scanner.enabled;
        let scanner = LatentLinkScanner::new(Arc::clone(&generator), Arc::clone(&corpus), config.scanner)
            .with_logger(Arc::clone(&logger))
            .with_rng(rng(1));

        let host = Self {
            salon: Arc::new(salon),
            discovery: DiscoveryCache::new(Arc::clone(&generator), config.discovery.ttl),
            fusion: FuseTopicsUseCase::new(generator),
            scanner: Arc::new(scanner),
            corpus,
            default_count: config.discovery.default_count,
            sessions: Mutex::new(HashMap::new()),
            logger,
        };

        if autostart {
            if tokio::runtime::Handle::try_current().is_ok() {
                host.toggle_latent_scan(true);
            } else {
                warn!("scanner.enabled is set but no runtime is running; scan not started");
            }
        }
        host
    }

    pub fn corpus(&self) -> &Arc<dyn TopicCorpus> {
        &self.corpus
    }

    pub fn default_count(&self) -> usize {
        self.default_count
    }

    // ==================== Sessions ====================

    /// Start a salon on a corpus topic in the background.
    pub fn create_session(
        &self,
        topic_id: &TopicId,
        user: Participant,
        observer: Arc<dyn SalonObserver>,
    ) -> Result<SessionId, SalonHostError> {
        let topic = self
            .corpus
            .get(topic_id)
            .ok_or_else(|| SalonHostError::UnknownTopic(topic_id.clone()))?;

        let (tx, rx) = mpsc::unbounded_channel();
        let input = RunSalonInput::new(topic, user).with_interjections(rx);
        let session_id = input.session_id.clone();
        let cancellation = CancellationToken::new();

        let salon = Arc::clone(&self.salon);
        let token = cancellation.clone();
        let task = tokio::spawn(async move {
            salon
                .execute_with_progress(input, observer.as_ref(), token)
                .await
        });

        lock(&self.sessions).insert(
            session_id.clone(),
            SessionHandle {
                cancellation,
                interjections: tx,
                task: Some(task),
            },
        );
        info!(session = %session_id, "Session started on {}", topic_id);
        Ok(session_id)
    }

    /// Request a running salon to stop. Returns `false` for unknown sessions.
    pub fn abort_session(&self, id: &SessionId) -> bool {
        match lock(&self.sessions).get(id) {
            Some(handle) => {
                handle.cancellation.cancel();
                true
            }
            None => false,
        }
    }

    /// Queue text for the user's envoy to speak on its next turn.
    pub fn interject(&self, id: &SessionId, text: impl Into<String>) -> bool {
        match lock(&self.sessions).get(id) {
            Some(handle) => handle.interjections.send(text.into()).is_ok(),
            None => false,
        }
    }

    /// Wait for a salon to finish and forget it.
    ///
    /// The session stays reachable through [`abort_session`](Self::abort_session)
    /// and [`interject`](Self::interject) while the caller waits.
    pub async fn wait(&self, id: &SessionId) -> Result<RunSalonOutput, SalonHostError> {
        let task = lock(&self.sessions)
            .get_mut(id)
            .and_then(|handle| handle.task.take())
            .ok_or_else(|| SalonHostError::UnknownSession(id.clone()))?;
        let joined = task.await;
        lock(&self.sessions).remove(id);
        match joined {
            Ok(result) => Ok(result?),
            Err(e) => Err(SalonHostError::TaskFailed(e.to_string())),
        }
    }

    pub fn active_sessions(&self) -> Vec<SessionId> {
        lock(&self.sessions)
            .iter()
            .filter(|(_, handle)| handle.task.as_ref().is_none_or(|task| !task.is_finished()))
            .map(|(id, _)| id.clone())
            .collect()
    }

    // ==================== Latent scanning ====================

    pub fn toggle_latent_scan(&self, enabled: bool) {
        self.scanner.set_enabled(enabled);
    }

    pub fn is_scanning(&self) -> bool {
        self.scanner.is_enabled()
    }

    pub fn scanning_pair(&self) -> Option<TopicPair> {
        self.scanner.scanning_pair()
    }

    pub fn links(&self) -> Vec<LatentLink> {
        self.scanner.links()
    }

    // ==================== Corpus growth ====================

    /// Discover new topics in `category` and add them to the corpus.
    ///
    /// Titles already in that category are excluded from the request.
    pub async fn discover(
        &self,
        category: Category,
        count: Option<usize>,
        excluded_keywords: Vec<String>,
    ) -> Vec<Topic> {
        let request = DiscoveryRequest::new(category, count.unwrap_or(self.default_count))
            .with_excluded_titles(self.corpus.titles_in(category))
            .with_excluded_keywords(excluded_keywords);

        let topics = self.discovery.discover(request).await;
        for topic in &topics {
            if self.corpus.append(topic.clone()) {
                self.logger.log(ConversationEvent::new(
                    "topic_discovered",
                    serde_json::json!({
                        "id": topic.id.as_str(),
                        "category": topic.category,
                        "title": topic.title,
                    }),
                ));
            }
        }
        topics
    }

    /// Fuse two corpus topics and add the result to the corpus.
    pub async fn fuse(&self, a: &TopicId, b: &TopicId) -> Result<Option<Topic>, SalonHostError> {
        let first = self
            .corpus
            .get(a)
            .ok_or_else(|| SalonHostError::UnknownTopic(a.clone()))?;
        let second = self
            .corpus
            .get(b)
            .ok_or_else(|| SalonHostError::UnknownTopic(b.clone()))?;

        let Some(fused) = self.fusion.execute(&first, &second).await else {
            warn!("Fusion of {} and {} produced nothing", a, b);
            return Ok(None);
        };

        self.corpus.append(fused.clone());
        self.logger.log(ConversationEvent::new(
            "topic_fused",
            serde_json::json!({
                "id": fused.id.as_str(),
                "title": fused.title,
                "parents": [a.as_str(), b.as_str()],
            }),
        ));
        Ok(Some(fused))
    }
}

//! Latent link scanner
//!
//! A background task that periodically samples two topics from different
//! categories and asks the generator whether they share a hidden structural
//! connection. Scans are deliberately scarce: most eligible pairs are
//! discarded before the generator is consulted, and at most one scan runs
//! at a time.

use crate::config::ScannerParams;
use crate::ports::content_generator::ContentGenerator;
use crate::ports::conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger};
use crate::ports::corpus::TopicCorpus;
use crate::use_cases::shared::lock;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use salon_domain::{LatentLink, LinkSet, PromptTemplate, Topic, TopicPair, parse_latent_insight};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// What a single scan tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    /// The corpus is too small to bother.
    CorpusTooSmall,
    /// Another scan is still in flight.
    Busy,
    /// The sampled pair shares a category.
    SameCategory,
    /// The sampled pair is already linked.
    AlreadyLinked,
    /// Dropped by the scarcity filter.
    Discarded,
    /// The generator saw no connection, or failed.
    NoLink,
    Linked(LatentLink),
}

/// Clears the in-flight flag and the scanning marker however a scan ends.
struct ScanGuard<'a> {
    in_flight: &'a AtomicBool,
    scanning: &'a Mutex<Option<TopicPair>>,
}

impl Drop for ScanGuard<'_> {
    fn drop(&mut self) {
        *lock(self.scanning) = None;
        self.in_flight.store(false, Ordering::Release);
    }
}

pub struct LatentLinkScanner<G: ContentGenerator + 'static> {
    generator: Arc<G>,
    corpus: Arc<dyn TopicCorpus>,
    params: ScannerParams,
    links: Mutex<LinkSet>,
    scanning: Mutex<Option<TopicPair>>,
    in_flight: AtomicBool,
    ticker: Mutex<Option<CancellationToken>>,
    rng: Mutex<StdRng>,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: ContentGenerator + 'static> LatentLinkScanner<G> {
    pub fn new(generator: Arc<G>, corpus: Arc<dyn TopicCorpus>, params: ScannerParams) -> Self {
        Self {
            generator,
            corpus,
            params,
            links: Mutex::new(LinkSet::new()),
            scanning: Mutex::new(None),
            in_flight: AtomicBool::new(false),
            ticker: Mutex::new(None),
            rng: Mutex::new(StdRng::from_entropy()),
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Mutex::new(rng);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn is_enabled(&self) -> bool {
        lock(&self.ticker).is_some()
    }

    /// Start or stop the background ticker. Idempotent.
    ///
    /// Stopping prevents further ticks; a scan already in flight still
    /// completes and records its link.
    pub fn set_enabled(self: &Arc<Self>, enabled: bool) {
        let mut ticker = lock(&self.ticker);
        match (enabled, ticker.is_some()) {
            (true, false) => {
                let token = CancellationToken::new();
                *ticker = Some(token.clone());
                tokio::spawn(Arc::clone(self).run_ticker(token));
                info!("Latent link scanner enabled (every {:?})", self.params.interval);
            }
            (false, true) => {
                if let Some(token) = ticker.take() {
                    token.cancel();
                }
                info!("Latent link scanner disabled");
            }
            _ => {}
        }
    }

    /// The pair currently being examined, if any.
    pub fn scanning_pair(&self) -> Option<TopicPair> {
        lock(&self.scanning).clone()
    }

    pub fn links(&self) -> Vec<LatentLink> {
        lock(&self.links).links().to_vec()
    }

    async fn run_ticker(self: Arc<Self>, token: CancellationToken) {
        let mut interval = tokio::time::interval(self.params.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first tick completes immediately; scanning starts one period in.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                _ = interval.tick() => {}
            }
            let scanner = Arc::clone(&self);
            tokio::spawn(async move {
                let outcome = scanner.scan_once().await;
                debug!("Scan tick: {:?}", outcome);
            });
        }
    }

    /// Run one scan tick.
    pub async fn scan_once(&self) -> ScanOutcome {
        let topics = self.corpus.snapshot();
        // A pair needs two topics whatever min_corpus says
        if topics.len() < 2 || topics.len() <= self.params.min_corpus {
            return ScanOutcome::CorpusTooSmall;
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return ScanOutcome::Busy;
        }
        let _guard = ScanGuard {
            in_flight: &self.in_flight,
            scanning: &self.scanning,
        };

        let (a, b, discard) = {
            let mut rng = lock(&self.rng);
            let Some((a, b)) = sample_pair(&mut *rng, &topics) else {
                return ScanOutcome::CorpusTooSmall;
            };
            (a, b, rng.gen_bool(self.params.scarcity.clamp(0.0, 1.0)))
        };

        if a.category == b.category {
            return ScanOutcome::SameCategory;
        }
        let pair = TopicPair::of(a, b);
        if lock(&self.links).contains(&pair) {
            return ScanOutcome::AlreadyLinked;
        }

        *lock(&self.scanning) = Some(pair.clone());
        if discard {
            return ScanOutcome::Discarded;
        }

        let prompt = PromptTemplate::latent_link_prompt(a, b);
        let response = match self.generator.generate_structured(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Latent scan of {} failed: {}", pair, e);
                return ScanOutcome::NoLink;
            }
        };
        let Some(insight) = parse_latent_insight(&response) else {
            return ScanOutcome::NoLink;
        };

        let link = LatentLink::new(pair, insight);
        if !lock(&self.links).insert(link.clone()) {
            return ScanOutcome::AlreadyLinked;
        }

        info!("Latent link {} <-> {}: {}", a.title, b.title, link.insight);
        self.logger.log(ConversationEvent::new(
            "latent_link",
            serde_json::json!({
                "link_id": link.id,
                "a": a.id.as_str(),
                "b": b.id.as_str(),
                "insight": link.insight,
            }),
        ));
        ScanOutcome::Linked(link)
    }
}

/// Two distinct topics sampled uniformly, or `None` with fewer than two.
fn sample_pair<'a, R: Rng>(rng: &mut R, topics: &'a [Topic]) -> Option<(&'a Topic, &'a Topic)> {
    if topics.len() < 2 {
        return None;
    }
    let first = rng.gen_range(0..topics.len());
    let mut second = rng.gen_range(0..topics.len() - 1);
    if second >= first {
        second += 1;
    }
    Some((&topics[first], &topics[second]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::content_generator::GenerationError;
    use crate::use_cases::testing::{ScriptedGenerator, VecCorpus, sample_topics};
    use salon_domain::Category;
    use std::time::Duration;

    const CROSS: [Category; 2] = [Category::True, Category::Good];

    fn scanner(
        generator: Arc<ScriptedGenerator>,
        topics: Vec<Topic>,
        params: ScannerParams,
    ) -> LatentLinkScanner<ScriptedGenerator> {
        LatentLinkScanner::new(generator, Arc::new(VecCorpus::new(topics)), params)
            .with_rng(StdRng::seed_from_u64(7))
    }

    fn eager() -> ScannerParams {
        ScannerParams::default().with_scarcity(0.0)
    }

    #[test]
    fn test_sample_pair_is_distinct() {
        let topics = sample_topics(2, &CROSS);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let (a, b) = sample_pair(&mut rng, &topics).unwrap();
            assert_ne!(a.id, b.id);
        }
        assert!(sample_pair(&mut rng, &topics[..1]).is_none());
        assert!(sample_pair(&mut rng, &[]).is_none());
    }

    #[tokio::test]
    async fn test_single_topic_is_skipped_without_min_corpus() {
        let generator = Arc::new(ScriptedGenerator::new());
        let params = eager().with_min_corpus(0);
        let scanner = scanner(Arc::clone(&generator), sample_topics(1, &CROSS), params);
        assert_eq!(scanner.scan_once().await, ScanOutcome::CorpusTooSmall);

        let empty = LatentLinkScanner::new(
            Arc::clone(&generator),
            Arc::new(VecCorpus::new(Vec::new())),
            eager().with_min_corpus(0),
        );
        assert_eq!(empty.scan_once().await, ScanOutcome::CorpusTooSmall);
        assert_eq!(generator.structured_calls(), 0);
    }

    #[tokio::test]
    async fn test_small_corpus_is_skipped() {
        let generator = Arc::new(ScriptedGenerator::new());
        let scanner = scanner(Arc::clone(&generator), sample_topics(5, &CROSS), eager());
        assert_eq!(scanner.scan_once().await, ScanOutcome::CorpusTooSmall);
        assert_eq!(generator.structured_calls(), 0);
    }

    #[tokio::test]
    async fn test_same_category_pair_never_reaches_generator() {
        let generator = Arc::new(ScriptedGenerator::new());
        let topics = sample_topics(8, &[Category::Beautiful]);
        let scanner = scanner(Arc::clone(&generator), topics, eager());
        for _ in 0..20 {
            assert_eq!(scanner.scan_once().await, ScanOutcome::SameCategory);
        }
        assert_eq!(generator.structured_calls(), 0);
    }

    #[tokio::test]
    async fn test_full_scarcity_never_reaches_generator() {
        let generator = Arc::new(ScriptedGenerator::new());
        let params = ScannerParams::default().with_scarcity(1.0);
        let scanner = scanner(Arc::clone(&generator), sample_topics(8, &CROSS), params);
        for _ in 0..20 {
            let outcome = scanner.scan_once().await;
            assert!(matches!(
                outcome,
                ScanOutcome::SameCategory | ScanOutcome::Discarded
            ));
        }
        assert_eq!(generator.structured_calls(), 0);
        assert!(scanner.scanning_pair().is_none());
    }

    #[tokio::test]
    async fn test_link_recorded_once_per_pair() {
        let generator =
            Arc::new(ScriptedGenerator::new().with_structured_default(r#"{"insight": "Both are waves"}"#));
        // Two topics in different categories: every scan samples the same pair.
        let params = eager().with_min_corpus(1);
        let scanner = scanner(Arc::clone(&generator), sample_topics(2, &CROSS), params);

        let first = scanner.scan_once().await;
        let ScanOutcome::Linked(link) = first else {
            panic!("expected a link, got {:?}", first);
        };
        assert_eq!(link.insight, "Both are waves");
        assert_eq!(scanner.scan_once().await, ScanOutcome::AlreadyLinked);
        assert_eq!(scanner.links().len(), 1);
        assert_eq!(generator.structured_calls(), 1);
        assert!(scanner.scanning_pair().is_none());
    }

    #[tokio::test]
    async fn test_negative_answer_records_nothing() {
        let generator = Arc::new(ScriptedGenerator::new().with_structured_default("NO"));
        let scanner = scanner(generator, sample_topics(2, &CROSS), eager().with_min_corpus(1));
        assert_eq!(scanner.scan_once().await, ScanOutcome::NoLink);
        assert!(scanner.links().is_empty());
    }

    #[tokio::test]
    async fn test_generator_failure_clears_marker() {
        let generator = Arc::new(
            ScriptedGenerator::new().with_structured(vec![Err(GenerationError::Timeout)]),
        );
        let scanner = scanner(generator, sample_topics(2, &CROSS), eager().with_min_corpus(1));
        assert_eq!(scanner.scan_once().await, ScanOutcome::NoLink);
        assert!(scanner.scanning_pair().is_none());
        assert!(!scanner.in_flight.load(Ordering::Acquire));
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_scan_is_busy() {
        let generator = Arc::new(
            ScriptedGenerator::new()
                .with_structured_default(r#"{"insight": "Shared logic"}"#)
                .with_delay(Duration::from_secs(10)),
        );
        let scanner = Arc::new(scanner(
            Arc::clone(&generator),
            sample_topics(2, &CROSS),
            eager().with_min_corpus(1),
        ));

        let running = {
            let scanner = Arc::clone(&scanner);
            tokio::spawn(async move { scanner.scan_once().await })
        };
        tokio::time::sleep(Duration::from_secs(1)).await;

        assert!(scanner.scanning_pair().is_some());
        assert_eq!(scanner.scan_once().await, ScanOutcome::Busy);
        assert!(matches!(running.await.unwrap(), ScanOutcome::Linked(_)));
        assert_eq!(generator.structured_calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_scans_until_disabled() {
        let generator =
            Arc::new(ScriptedGenerator::new().with_structured_default(r#"{"insight": "Echo"}"#));
        let params = eager().with_min_corpus(1).with_interval(Duration::from_secs(3));
        let scanner = Arc::new(scanner(
            Arc::clone(&generator),
            sample_topics(2, &CROSS),
            params,
        ));

        scanner.set_enabled(true);
        scanner.set_enabled(true);
        assert!(scanner.is_enabled());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        assert_eq!(scanner.links().len(), 1);

        scanner.set_enabled(false);
        assert!(!scanner.is_enabled());
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(generator.structured_calls(), 1);
    }
}

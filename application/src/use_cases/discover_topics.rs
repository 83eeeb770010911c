//! Topic discovery with a time-bounded, single-flight cache
//!
//! Identical discovery requests within the TTL are served from the cache.
//! Concurrent identical requests share one generator call; only non-empty
//! results are cached, so a failed or empty flight is retried by the next
//! request after it settles.

use crate::ports::content_generator::ContentGenerator;
use crate::use_cases::shared::lock;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use salon_domain::{Category, PromptTemplate, Topic, TopicId, parse_discovery_response};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

type Flight = Shared<BoxFuture<'static, Vec<Topic>>>;

/// A request for new topics in one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryRequest {
    pub category: Category,
    pub count: usize,
    /// Titles the generator must not repeat (usually the category's corpus).
    pub excluded_titles: Vec<String>,
    /// Themes the generator must avoid.
    pub excluded_keywords: Vec<String>,
}

impl DiscoveryRequest {
    pub fn new(category: Category, count: usize) -> Self {
        Self {
            category,
            count,
            excluded_titles: Vec::new(),
            excluded_keywords: Vec::new(),
        }
    }

    pub fn with_excluded_titles(mut self, titles: Vec<String>) -> Self {
        self.excluded_titles = titles;
        self
    }

    pub fn with_excluded_keywords(mut self, keywords: Vec<String>) -> Self {
        self.excluded_keywords = keywords;
        self
    }

    /// Cache key. Exclusion lists are order-insensitive.
    pub fn cache_key(&self) -> String {
        let mut titles = self.excluded_titles.clone();
        titles.sort();
        let mut keywords = self.excluded_keywords.clone();
        keywords.sort();
        format!(
            "DISCOVER_{}_{}_{}_{}",
            self.category,
            self.count,
            titles.join("|"),
            keywords.join("|")
        )
    }
}

struct CacheEntry {
    created_at: Instant,
    topics: Vec<Topic>,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<String, CacheEntry>,
    in_flight: HashMap<String, Flight>,
}

pub struct DiscoveryCache<G: ContentGenerator + 'static> {
    generator: Arc<G>,
    ttl: Duration,
    state: Arc<Mutex<CacheState>>,
}

impl<G: ContentGenerator + 'static> DiscoveryCache<G> {
    pub fn new(generator: Arc<G>, ttl: Duration) -> Self {
        Self {
            generator,
            ttl,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Discover topics, consulting the cache first.
    ///
    /// Returns an empty list when the generator fails or answers with
    /// nothing usable.
    pub async fn discover(&self, request: DiscoveryRequest) -> Vec<Topic> {
        let key = request.cache_key();

        let flight = {
            let mut state = lock(&self.state);
            let ttl = self.ttl;
            state.entries.retain(|_, entry| entry.created_at.elapsed() < ttl);
            if let Some(entry) = state.entries.get(&key)
                && entry.created_at.elapsed() < self.ttl
            {
                debug!("Discovery cache hit: {}", key);
                return entry.topics.clone();
            }
            match state.in_flight.get(&key) {
                Some(flight) => {
                    debug!("Joining in-flight discovery: {}", key);
                    flight.clone()
                }
                None => {
                    let flight = self.start_flight(key.clone(), request).shared();
                    state.in_flight.insert(key, flight.clone());
                    flight
                }
            }
        };

        flight.await
    }

    /// Number of unexpired cached results.
    pub fn cached_len(&self) -> usize {
        let state = lock(&self.state);
        state
            .entries
            .values()
            .filter(|e| e.created_at.elapsed() < self.ttl)
            .count()
    }

    /// Entries held in memory, expired or not.
    #[cfg(test)]
    fn stored_len(&self) -> usize {
        lock(&self.state).entries.len()
    }

    fn start_flight(&self, key: String, request: DiscoveryRequest) -> BoxFuture<'static, Vec<Topic>> {
        let generator = Arc::clone(&self.generator);
        let state = Arc::clone(&self.state);

        async move {
            let prompt = PromptTemplate::discovery_prompt(
                request.category,
                &request.excluded_titles,
                &request.excluded_keywords,
                request.count,
            );
            let topics: Vec<Topic> = match generator.generate_structured(&prompt).await {
                Ok(response) => parse_discovery_response(&response)
                    .into_iter()
                    .take(request.count)
                    .map(|draft| draft.into_topic(TopicId::generate("gen"), request.category))
                    .collect(),
                Err(e) => {
                    warn!("Discovery for {} failed: {}", request.category, e);
                    Vec::new()
                }
            };

            let mut state = lock(&state);
            state.in_flight.remove(&key);
            if topics.is_empty() {
                debug!("Discovery for {} produced nothing; not cached", request.category);
            } else {
                info!("Discovered {} topics for {}", topics.len(), request.category);
                state.entries.insert(
                    key,
                    CacheEntry {
                        created_at: Instant::now(),
                        topics: topics.clone(),
                    },
                );
            }
            topics
        }
        .boxed()
    }
}

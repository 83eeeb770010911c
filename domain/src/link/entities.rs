//! Latent link entities

use crate::topic::entities::{Topic, TopicId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unordered pair of topic identities.
///
/// `TopicPair::new(a, b) == TopicPair::new(b, a)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicPair {
    low: TopicId,
    high: TopicId,
}

impl TopicPair {
    pub fn new(a: TopicId, b: TopicId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn of(a: &Topic, b: &Topic) -> Self {
        Self::new(a.id.clone(), b.id.clone())
    }

    pub fn ids(&self) -> (&TopicId, &TopicId) {
        (&self.low, &self.high)
    }

    pub fn contains(&self, id: &TopicId) -> bool {
        &self.low == id || &self.high == id
    }
}

impl std::fmt::Display for TopicPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.low, self.high)
    }
}

/// A discovered hidden connection (Entity)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatentLink {
    pub id: String,
    pub pair: TopicPair,
    pub insight: String,
    pub timestamp: DateTime<Utc>,
}

impl LatentLink {
    pub fn new(pair: TopicPair, insight: impl Into<String>) -> Self {
        Self {
            id: format!("link-{}", uuid::Uuid::new_v4()),
            pair,
            insight: insight.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Append-only set of links, unique per unordered pair.
#[derive(Debug, Clone, Default)]
pub struct LinkSet {
    links: Vec<LatentLink>,
    pairs: HashSet<TopicPair>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, pair: &TopicPair) -> bool {
        self.pairs.contains(pair)
    }

    /// Record a link. Returns `false` if its pair is already linked.
    pub fn insert(&mut self, link: LatentLink) -> bool {
        if !self.pairs.insert(link.pair.clone()) {
            return false;
        }
        self.links.push(link);
        true
    }

    pub fn links(&self) -> &[LatentLink] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_is_unordered() {
        let ab = TopicPair::new(TopicId::new("t1"), TopicId::new("g1"));
        let ba = TopicPair::new(TopicId::new("g1"), TopicId::new("t1"));
        assert_eq!(ab, ba);
        assert!(ab.contains(&TopicId::new("t1")));
        assert_eq!(ab.ids().0.as_str(), "g1");
    }

    #[test]
    fn test_link_set_rejects_duplicate_pairs() {
        let mut set = LinkSet::new();
        assert!(set.insert(LatentLink::new(
            TopicPair::new(TopicId::new("t1"), TopicId::new("b1")),
            "Both are about proportion."
        )));
        assert!(!set.insert(LatentLink::new(
            TopicPair::new(TopicId::new("b1"), TopicId::new("t1")),
            "Another take."
        )));
        assert_eq!(set.len(), 1);
        assert_eq!(set.links()[0].insight, "Both are about proportion.");
    }
}

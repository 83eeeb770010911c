//! Topic corpus port
//!
//! The corpus owner keeps the shared, growing collection of topics. The core
//! reads snapshots of it and hands it newly discovered, fused and emergent
//! topics; it never removes or mutates existing ones.

use salon_domain::{Category, Topic, TopicId};

pub trait TopicCorpus: Send + Sync {
    /// Current contents, in insertion order.
    fn snapshot(&self) -> Vec<Topic>;

    /// Append a topic. Returns `false` if a topic with the same identity
    /// is already present.
    fn append(&self, topic: Topic) -> bool;

    fn get(&self, id: &TopicId) -> Option<Topic> {
        self.snapshot().into_iter().find(|t| &t.id == id)
    }

    fn len(&self) -> usize {
        self.snapshot().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Titles of every topic in `category`.
    fn titles_in(&self, category: Category) -> Vec<String> {
        self.snapshot()
            .into_iter()
            .filter(|t| t.category == category)
            .map(|t| t.title)
            .collect()
    }
}

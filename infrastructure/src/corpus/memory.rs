use salon_application::TopicCorpus;
use salon_domain::{Topic, TopicId};
use std::sync::RwLock;
use tracing::debug;

/// Append-only topic corpus held in memory.
///
/// Readers get snapshots, so a long scan never blocks appends.
#[derive(Debug, Default)]
pub struct InMemoryCorpus {
    topics: RwLock<Vec<Topic>>,
}

impl InMemoryCorpus {
    pub fn new(topics: Vec<Topic>) -> Self {
        let corpus = Self::default();
        for topic in topics {
            corpus.append(topic);
        }
        corpus
    }
}

impl TopicCorpus for InMemoryCorpus {
    fn snapshot(&self) -> Vec<Topic> {
        match self.topics.read() {
            Ok(topics) => topics.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn append(&self, topic: Topic) -> bool {
        let mut topics = match self.topics.write() {
            Ok(topics) => topics,
            Err(poisoned) => poisoned.into_inner(),
        };
        if topics.iter().any(|t| t.id == topic.id) {
            debug!("Topic {} already in corpus", topic.id);
            return false;
        }
        topics.push(topic);
        true
    }

    fn get(&self, id: &TopicId) -> Option<Topic> {
        let topics = self.topics.read().ok()?;
        topics.iter().find(|t| &t.id == id).cloned()
    }

    fn len(&self) -> usize {
        self.topics.read().map(|t| t.len()).unwrap_or(0)
    }
}

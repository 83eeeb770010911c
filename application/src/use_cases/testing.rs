//! Scripted content generator shared by the use case tests.

use crate::ports::content_generator::{ContentGenerator, GenerationError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) struct ScriptedGenerator {
    text: Mutex<VecDeque<Result<String, GenerationError>>>,
    structured: Mutex<VecDeque<Result<String, GenerationError>>>,
    structured_default: String,
    delay: Duration,
    text_calls: AtomicUsize,
    structured_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub(crate) fn new() -> Self {
        Self {
            text: Mutex::new(VecDeque::new()),
            structured: Mutex::new(VecDeque::new()),
            structured_default: "NO".to_string(),
            delay: Duration::ZERO,
            text_calls: AtomicUsize::new(0),
            structured_calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_text(self, replies: Vec<Result<String, GenerationError>>) -> Self {
        *self.text.lock().unwrap() = replies.into();
        self
    }

    pub(crate) fn with_structured(self, replies: Vec<Result<String, GenerationError>>) -> Self {
        *self.structured.lock().unwrap() = replies.into();
        self
    }

    pub(crate) fn with_structured_default(mut self, reply: &str) -> Self {
        self.structured_default = reply.to_string();
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn structured_calls(&self) -> usize {
        self.structured_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn structured_prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_text(
        &self,
        _persona: &str,
        _topic_context: &str,
        _transcript: &str,
    ) -> Result<String, GenerationError> {
        let n = self.text_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let scripted = self.text.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(format!("Thought number {}.", n)))
    }

    async fn generate_structured(&self, prompt: &str) -> Result<String, GenerationError> {
        self.structured_calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let scripted = self.structured.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(self.structured_default.clone()))
    }
}

/// Vec-backed corpus for tests.
pub(crate) struct VecCorpus {
    topics: Mutex<Vec<salon_domain::Topic>>,
}

impl VecCorpus {
    pub(crate) fn new(topics: Vec<salon_domain::Topic>) -> Self {
        Self {
            topics: Mutex::new(topics),
        }
    }
}

impl crate::ports::corpus::TopicCorpus for VecCorpus {
    fn snapshot(&self) -> Vec<salon_domain::Topic> {
        self.topics.lock().unwrap().clone()
    }

    fn append(&self, topic: salon_domain::Topic) -> bool {
        let mut topics = self.topics.lock().unwrap();
        if topics.iter().any(|t| t.id == topic.id) {
            return false;
        }
        topics.push(topic);
        true
    }
}

/// Topics cycling through the given categories.
pub(crate) fn sample_topics(count: usize, categories: &[salon_domain::Category]) -> Vec<salon_domain::Topic> {
    (0..count)
        .map(|i| {
            salon_domain::Topic::new(
                format!("t{}", i),
                categories[i % categories.len()],
                format!("Topic {}", i),
                format!("Description {}", i),
                "Significant",
            )
        })
        .collect()
}

//! Emergence detection
//!
//! Asks the generator whether a salon transcript has synthesized a new,
//! distinct concept and, if so, turns the answer into a cross-cutting topic.

use crate::ports::content_generator::ContentGenerator;
use chrono::{Datelike, Utc};
use salon_domain::{Category, Message, PromptTemplate, Topic, TopicId, parse_emergence_response};
use std::sync::Arc;
use tracing::{debug, info, warn};

const DEFAULT_SIGNIFICANCE: &str = "Emerged from salon discussion.";

pub struct EmergenceDetector<G: ContentGenerator + 'static> {
    generator: Arc<G>,
}

impl<G: ContentGenerator + 'static> EmergenceDetector<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Inspect `transcript` for a topic that emerged from discussing `topic`.
    ///
    /// Generator failures and unparseable answers count as "nothing emerged".
    pub async fn detect(&self, transcript: &[Message], topic: &Topic) -> Option<Topic> {
        let conversation = transcript
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");
        let prompt = PromptTemplate::emergence_prompt(topic, &conversation);

        let response = match self.generator.generate_structured(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Emergence check failed: {}", e);
                return None;
            }
        };

        let Some(draft) = parse_emergence_response(&response) else {
            debug!("No emergent concept in {} messages", transcript.len());
            return None;
        };

        let mut emerged = draft.into_topic(TopicId::generate("emergent"), Category::CROSS_CUTTING);
        if emerged.significance.trim().is_empty() {
            emerged.significance = DEFAULT_SIGNIFICANCE.to_string();
        }
        emerged.discovered_by = Some(format!("Salon synthesis on \"{}\"", topic.title));
        emerged.year = Some(Utc::now().year().to_string());
        emerged.parents.clear();

        info!("Emergent topic crystallized: {}", emerged.title);
        Some(emerged)
    }
}

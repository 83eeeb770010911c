//! Conceptual fusion of two topics into a hypothetical third.

use crate::ports::content_generator::ContentGenerator;
use salon_domain::{Category, PromptTemplate, Topic, TopicId, parse_fusion_response};
use std::sync::Arc;
use tracing::{info, warn};

const FUSION_LAB: &str = "TIER Fusion Lab";
const FUSION_ERA: &str = "Future Era";

pub struct FuseTopicsUseCase<G: ContentGenerator + 'static> {
    generator: Arc<G>,
}

impl<G: ContentGenerator + 'static> FuseTopicsUseCase<G> {
    pub fn new(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// Fuse `a` and `b`.
    ///
    /// The result is cross-cutting, speculative and records both inputs as
    /// parents. Returns `None` when the generator fails or its answer is
    /// unusable, or when asked to fuse a topic with itself.
    pub async fn execute(&self, a: &Topic, b: &Topic) -> Option<Topic> {
        if a.id == b.id {
            warn!("Refusing to fuse {} with itself", a.id);
            return None;
        }

        let prompt = PromptTemplate::fusion_prompt(a, b);
        let response = match self.generator.generate_structured(&prompt).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fusion of {} and {} failed: {}", a.title, b.title, e);
                return None;
            }
        };

        let draft = parse_fusion_response(&response)?;
        let discovered_by = draft
            .discovered_by
            .clone()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| FUSION_LAB.to_string());

        let fused = draft
            .into_topic(TopicId::generate("fused"), Category::CROSS_CUTTING)
            .with_provenance(discovered_by, FUSION_ERA)
            .with_parents(vec![a.id.clone(), b.id.clone()]);

        info!("Fused {} + {} into {}", a.title, b.title, fused.title);
        Some(fused)
    }
}

//! Prompt templates for the salon flow

use crate::core::category::Category;
use crate::topic::entities::Topic;

/// Templates for every prompt the salon sends to the content generator
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt for a single conversational turn.
    pub fn turn_prompt(persona: &str, topic_context: &str, transcript: &str) -> String {
        format!(
            r#"Context: TIER Knowledge Salon (Automated Multi-Agent Simulation).
Topic: {topic_context}

{persona}

Current Conversation Transcript:
{transcript}

INSTRUCTIONS:
1. Read the transcript.
2. Speak as your persona.
3. Respond to the last speaker or the general topic.
4. Keep it under 60 words (short, punchy, conversational).
5. Maintain the "Edison/Newton" level of intellect.
6. Do NOT prefix your response with your name. Just speak."#
        )
    }

    /// Ask whether the transcript has synthesized a new concept.
    pub fn emergence_prompt(topic: &Topic, transcript: &str) -> String {
        format!(
            r#"Analyze the following high-level salon discussion about "{}".
Conversation:
{}

Has the group synthesized a NEW, distinct knowledge concept?

If yes, return JSON: {{ "title": "...", "description": "...", "significance": "..." }}
If no, return string "NO"."#,
            topic.title, transcript
        )
    }

    /// Ask for `count` new topics in a category.
    pub fn discovery_prompt(
        category: Category,
        excluded_titles: &[String],
        excluded_keywords: &[String],
        count: usize,
    ) -> String {
        let mut prompt = format!(
            r#"Act as a curator of the "TIER Knowledge Salon".
Generate {} NEW, DISTINCT knowledge capsules for the dimension: "{}" ({}).

CRITERIA: Edison/Newton level magnitude. Civilization shifting.

EXCLUDE: {}
"#,
            count,
            category,
            category.subtitle(),
            excluded_titles.join(", ")
        );

        if !excluded_keywords.is_empty() {
            prompt.push_str(&format!(
                "STRICTLY EXCLUDE concepts related to: {}.\n",
                excluded_keywords.join(", ")
            ));
        }

        prompt.push_str(
            r#"
OUTPUT JSON Array:
[{ "title": "...", "description": "...", "significance": "...", "discoveredBy": "...", "year": "..." }]"#,
        );
        prompt
    }

    /// Ask for a hypothetical synthesis of two topics.
    pub fn fusion_prompt(a: &Topic, b: &Topic) -> String {
        format!(
            r#"Act as a "Radical Scientific Innovator".
Perform a 'Conceptual Fusion' of:
1. {} ({})
2. {} ({})

Propose a concrete HYPOTHETICAL DISCOVERY (Nobel Prize level).

OUTPUT JSON:
{{ "title": "...", "description": "...", "significance": "...", "discoveredBy": "TIER Fusion Lab" }}"#,
            a.title, a.description, b.title, b.description
        )
    }

    /// Ask whether two topics share a hidden structural connection.
    pub fn latent_link_prompt(a: &Topic, b: &Topic) -> String {
        format!(
            r#"Task: Latent Structural Analysis.
Analyze the hidden structural isomorphism between:
A: {} ({})
B: {} ({})

Are these two concepts deeply connected by a shared underlying logic, mechanism, or philosophical principle?
(Ignore surface-level text differences. Look for "Latent Representations").

If YES: return JSON {{ "insight": "<a very short, cryptic insight, max 10 words>" }}
If NO: return the exact string "NO"."#,
            a.title, a.description, b.title, b.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topic(id: &str, category: Category, title: &str) -> Topic {
        Topic::new(id, category, title, format!("{} description", title), "Matters.")
    }

    #[test]
    fn test_turn_prompt_contains_all_parts() {
        let prompt = PromptTemplate::turn_prompt(
            "YOU ARE: \"Terra\".",
            "Gaia Hypothesis - Earth as a system",
            "The Architect: Welcome.",
        );
        assert!(prompt.contains("YOU ARE: \"Terra\"."));
        assert!(prompt.contains("Topic: Gaia Hypothesis - Earth as a system"));
        assert!(prompt.contains("The Architect: Welcome."));
    }

    #[test]
    fn test_discovery_prompt_exclusions() {
        let prompt = PromptTemplate::discovery_prompt(
            Category::Good,
            &["Social Contract".to_string(), "Wealth of Nations".to_string()],
            &[],
            3,
        );
        assert!(prompt.contains("Generate 3 NEW"));
        assert!(prompt.contains("\"GOOD\" (Social Sciences)"));
        assert!(prompt.contains("EXCLUDE: Social Contract, Wealth of Nations"));
        assert!(!prompt.contains("STRICTLY EXCLUDE"));

        let prompt =
            PromptTemplate::discovery_prompt(Category::Good, &[], &["war".to_string()], 1);
        assert!(prompt.contains("STRICTLY EXCLUDE concepts related to: war."));
    }

    #[test]
    fn test_fusion_and_latent_prompts_name_both_topics() {
        let a = topic("t1", Category::True, "Thermodynamics");
        let b = topic("b2", Category::Beautiful, "Stream of Consciousness");
        for prompt in [
            PromptTemplate::fusion_prompt(&a, &b),
            PromptTemplate::latent_link_prompt(&a, &b),
        ] {
            assert!(prompt.contains("Thermodynamics"));
            assert!(prompt.contains("Stream of Consciousness"));
        }
    }

    #[test]
    fn test_emergence_prompt() {
        let base = topic("s2", Category::Spirit, "Cybernetics");
        let prompt = PromptTemplate::emergence_prompt(&base, "Ada 2.0: feedback is all.");
        assert!(prompt.contains("about \"Cybernetics\""));
        assert!(prompt.contains("Ada 2.0: feedback is all."));
        assert!(prompt.contains("\"NO\""));
    }
}

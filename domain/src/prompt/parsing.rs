//! Tolerant parsing of structured generator output.
//!
//! Generators are asked for JSON but routinely wrap it in prose or code
//! fences, or answer with a bare `NO`. None of these functions fail: a
//! malformed answer is indistinguishable from "no result".
//!
//! | Function | Expected payload |
//! |----------|------------------|
//! | [`parse_emergence_response`] | `{ "title", "description", "significance" }` or `NO` |
//! | [`parse_discovery_response`] | `[{ "title", ... }, ...]` |
//! | [`parse_fusion_response`] | `{ "title", ..., "discoveredBy" }` |
//! | [`parse_latent_insight`] | `{ "insight" }`, a JSON string, plain text, or `NO` |

use crate::core::category::Category;
use crate::topic::entities::{Topic, TopicId};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Topic fields as returned by the generator, before an identity is assigned.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicDraft {
    pub title: String,
    pub description: String,
    pub significance: String,
    #[serde(deserialize_with = "lenient_text")]
    pub discovered_by: Option<String>,
    /// Often sent as a bare number (`1687`).
    #[serde(deserialize_with = "lenient_text")]
    pub year: Option<String>,
}

/// Strings pass through, numbers are stringified, anything else is dropped.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

impl TopicDraft {
    fn is_usable(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Turn the draft into a Topic with the given identity and category.
    pub fn into_topic(self, id: TopicId, category: Category) -> Topic {
        Topic {
            id,
            category,
            title: self.title.trim().to_string(),
            description: self.description,
            significance: self.significance,
            discovered_by: self.discovered_by,
            year: self.year,
            parents: Vec::new(),
        }
    }
}

/// Whether a response is the negative sentinel (`NO`, `"NO"`, `No.`).
pub fn is_negative_sentinel(response: &str) -> bool {
    let stripped = response
        .trim()
        .trim_matches(|c: char| c == '"' || c == '\'' || c == '.' || c == '`' || c.is_whitespace());
    stripped.eq_ignore_ascii_case("no")
}

/// Locate the JSON value in a response, skipping prose and code fences.
fn extract_json(response: &str, open: char, close: char) -> Option<Value> {
    let trimmed = response.trim();
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Some(value);
    }
    let start = trimmed.find(open)?;
    let end = trimmed.rfind(close)?;
    if end <= start {
        return None;
    }
    serde_json::from_str(&trimmed[start..=end]).ok()
}

fn draft_from_value(value: Value) -> Option<TopicDraft> {
    serde_json::from_value::<TopicDraft>(value)
        .ok()
        .filter(TopicDraft::is_usable)
}

/// Parse the emergence detector's answer.
pub fn parse_emergence_response(response: &str) -> Option<TopicDraft> {
    if response.trim().is_empty() || is_negative_sentinel(response) {
        return None;
    }
    match extract_json(response, '{', '}')? {
        value @ Value::Object(_) => draft_from_value(value),
        _ => None,
    }
}

/// Parse a discovery answer; unusable entries are skipped.
pub fn parse_discovery_response(response: &str) -> Vec<TopicDraft> {
    match extract_json(response, '[', ']') {
        Some(Value::Array(items)) => items.into_iter().filter_map(draft_from_value).collect(),
        Some(value @ Value::Object(_)) => draft_from_value(value).into_iter().collect(),
        _ => Vec::new(),
    }
}

/// Parse a fusion answer.
pub fn parse_fusion_response(response: &str) -> Option<TopicDraft> {
    match extract_json(response, '{', '}')? {
        value @ Value::Object(_) => draft_from_value(value),
        _ => None,
    }
}

/// Parse a latent scan answer into an insight string.
pub fn parse_latent_insight(response: &str) -> Option<String> {
    let trimmed = response.trim();
    if trimmed.is_empty() || is_negative_sentinel(trimmed) {
        return None;
    }

    let insight = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(s)) => s,
        Ok(Value::Object(map)) => map.get("insight")?.as_str()?.to_string(),
        Ok(_) => return None,
        Err(_) => trimmed.to_string(),
    };

    let insight = insight.trim();
    if insight.is_empty() || is_negative_sentinel(insight) {
        None
    } else {
        Some(insight.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Sentinel ====================

    #[test]
    fn test_negative_sentinel_variants() {
        assert!(is_negative_sentinel("NO"));
        assert!(is_negative_sentinel("  \"NO\"\n"));
        assert!(is_negative_sentinel("No."));
        assert!(!is_negative_sentinel("NOVA"));
        assert!(!is_negative_sentinel("{\"title\": \"NO limits\"}"));
    }

    // ==================== Emergence ====================

    #[test]
    fn test_emergence_json() {
        let draft = parse_emergence_response(
            r#"{"title": "Entropic Ethics", "description": "Morality as entropy management.", "significance": "Bridges physics and ethics."}"#,
        )
        .unwrap();
        assert_eq!(draft.title, "Entropic Ethics");
        assert!(draft.discovered_by.is_none());
    }

    #[test]
    fn test_emergence_inside_code_fence() {
        let response = "Here it is:\n```json\n{\"title\": \"Civic Thermodynamics\"}\n```";
        let draft = parse_emergence_response(response).unwrap();
        assert_eq!(draft.title, "Civic Thermodynamics");
        assert_eq!(draft.description, "");
    }

    #[test]
    fn test_emergence_no_result_cases() {
        assert!(parse_emergence_response("NO").is_none());
        assert!(parse_emergence_response("\"NO\"").is_none());
        assert!(parse_emergence_response("").is_none());
        assert!(parse_emergence_response("{\"description\": \"untitled\"}").is_none());
        assert!(parse_emergence_response("{\"title\": \"   \"}").is_none());
        assert!(parse_emergence_response("{ not json").is_none());
        assert!(parse_emergence_response("[{\"title\": \"array\"}]").is_none());
    }

    // ==================== Discovery ====================

    #[test]
    fn test_discovery_array() {
        let drafts = parse_discovery_response(
            r#"[
                {"title": "Entanglement", "description": "d", "significance": "s", "discoveredBy": "EPR", "year": "1935"},
                {"description": "missing title"},
                {"title": "Superconductivity"}
            ]"#,
        );
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].discovered_by.as_deref(), Some("EPR"));
        assert_eq!(drafts[1].title, "Superconductivity");
    }

    #[test]
    fn test_discovery_numeric_year_is_kept() {
        let drafts = parse_discovery_response(
            r#"[
                {"title": "Calculus", "description": "d", "significance": "s", "discoveredBy": "Newton", "year": 1687},
                {"title": "Evolution", "year": null, "discoveredBy": ["Darwin", "Wallace"]}
            ]"#,
        );
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].year.as_deref(), Some("1687"));
        assert_eq!(drafts[0].discovered_by.as_deref(), Some("Newton"));
        assert!(drafts[1].year.is_none());
        assert!(drafts[1].discovered_by.is_none());
    }

    #[test]
    fn test_discovery_malformed_is_empty() {
        assert!(parse_discovery_response("").is_empty());
        assert!(parse_discovery_response("I cannot help with that.").is_empty());
        assert!(parse_discovery_response("[{\"title\": ").is_empty());
    }

    #[test]
    fn test_draft_into_topic() {
        let draft = TopicDraft {
            title: "  Entanglement ".to_string(),
            ..Default::default()
        };
        let topic = draft.into_topic(TopicId::new("gen-1"), Category::True);
        assert_eq!(topic.title, "Entanglement");
        assert_eq!(topic.category, Category::True);
        assert!(topic.parents.is_empty());
    }

    // ==================== Fusion ====================

    #[test]
    fn test_fusion_response() {
        let draft = parse_fusion_response(
            r#"{"title": "Genomic Jurisprudence", "description": "d", "significance": "s", "discoveredBy": "TIER Fusion Lab"}"#,
        )
        .unwrap();
        assert_eq!(draft.discovered_by.as_deref(), Some("TIER Fusion Lab"));
        assert!(parse_fusion_response("NO").is_none());
    }

    // ==================== Latent insight ====================

    #[test]
    fn test_latent_insight_forms() {
        assert_eq!(
            parse_latent_insight(r#"{"insight": "Both encode order in spirals."}"#).as_deref(),
            Some("Both encode order in spirals.")
        );
        assert_eq!(
            parse_latent_insight("\"Feedback binds them.\"").as_deref(),
            Some("Feedback binds them.")
        );
        assert_eq!(
            parse_latent_insight("Symmetry breaking, twice.").as_deref(),
            Some("Symmetry breaking, twice.")
        );
    }

    #[test]
    fn test_latent_insight_negative() {
        assert!(parse_latent_insight("NO").is_none());
        assert!(parse_latent_insight("\"NO\"").is_none());
        assert!(parse_latent_insight("   ").is_none());
        assert!(parse_latent_insight(r#"{"insight": ""}"#).is_none());
        assert!(parse_latent_insight(r#"{"other": "x"}"#).is_none());
        assert!(parse_latent_insight("42").is_none());
    }
}

//! Topic entities

use crate::core::category::Category;
use serde::{Deserialize, Serialize};

/// Identity of a Topic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a fresh identity with the given prefix (e.g. `gen`, `fused`).
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, uuid::Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<T: Into<String>> From<T> for TopicId {
    fn from(s: T) -> Self {
        Self::new(s)
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A knowledge capsule (Entity)
///
/// Immutable once created. Topics are seeded at startup or produced by
/// discovery, fusion and emergence, and are only ever appended to a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub id: TopicId,
    pub category: Category,
    pub title: String,
    pub description: String,
    /// Why this topic matters.
    pub significance: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discovered_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Identities of the Topics this one was fused from.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<TopicId>,
}

impl Topic {
    pub fn new(
        id: impl Into<TopicId>,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        significance: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
            description: description.into(),
            significance: significance.into(),
            discovered_by: None,
            year: None,
            parents: Vec::new(),
        }
    }

    pub fn with_provenance(mut self, discovered_by: impl Into<String>, year: impl Into<String>) -> Self {
        self.discovered_by = Some(discovered_by.into());
        self.year = Some(year.into());
        self
    }

    pub fn with_parents(mut self, parents: Vec<TopicId>) -> Self {
        self.parents = parents;
        self
    }

    pub fn is_fusion(&self) -> bool {
        !self.parents.is_empty()
    }

    /// One-line context used when prompting about this topic.
    pub fn context_line(&self) -> String {
        format!("{} - {} ({})", self.title, self.description, self.significance)
    }
}

//! Category value object: the thematic bucket of a Topic

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Thematic bucket a Topic belongs to (Value Object)
///
/// The set is fixed. [`Category::Spirit`] is the cross-cutting category that
/// emergent and fused Topics are filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    True,
    Good,
    Beautiful,
    Spirit,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::True,
        Category::Good,
        Category::Beautiful,
        Category::Spirit,
    ];

    /// Category used for synthesized Topics (emergence and fusion).
    pub const CROSS_CUTTING: Category = Category::Spirit;

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::True => "TRUE",
            Category::Good => "GOOD",
            Category::Beautiful => "BEAUTIFUL",
            Category::Spirit => "SPIRIT",
        }
    }

    pub fn subtitle(&self) -> &'static str {
        match self {
            Category::True => "Natural Sciences",
            Category::Good => "Social Sciences",
            Category::Beautiful => "Humanities",
            Category::Spirit => "Interdisciplinary",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Category::True => {
                "The pursuit of objective reality, physics, and the laws of the universe."
            }
            Category::Good => "The study of society, ethics, economics, and human governance.",
            Category::Beautiful => {
                "Art, literature, philosophy, and the expression of the human condition."
            }
            Category::Spirit => {
                "The intersection of consciousness, AI, quantum mechanics, and metaphysics."
            }
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TRUE" => Ok(Category::True),
            "GOOD" => Ok(Category::Good),
            "BEAUTIFUL" => Ok(Category::Beautiful),
            "SPIRIT" => Ok(Category::Spirit),
            _ => Err(DomainError::UnknownCategory(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("true".parse::<Category>().unwrap(), Category::True);
        assert_eq!(" Beautiful ".parse::<Category>().unwrap(), Category::Beautiful);
        assert!("SCIENCE".parse::<Category>().is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.to_string().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_serde_uses_screaming_case() {
        let json = serde_json::to_string(&Category::Beautiful).unwrap();
        assert_eq!(json, "\"BEAUTIFUL\"");
    }

    #[test]
    fn test_cross_cutting_is_spirit() {
        assert_eq!(Category::CROSS_CUTTING, Category::Spirit);
        assert_eq!(Category::Spirit.subtitle(), "Interdisciplinary");
    }
}

//! Seed corpus loading from TOML.
//!
//! ```toml
//! [[topics]]
//! id = "t1"
//! category = "TRUE"
//! title = "Universal Gravitation"
//! description = "Mathematical description of gravity."
//! significance = "Unified celestial and terrestrial mechanics."
//! discoveredBy = "Isaac Newton"
//! year = "1687"
//! ```

use salon_domain::Topic;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;
use tracing::info;

const DEFAULT_SEED: &str = include_str!("../../seed/topics.toml");

#[derive(Error, Debug)]
pub enum SeedError {
    #[error("Failed to read seed file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Duplicate topic id in seed: {0}")]
    DuplicateId(String),
}

#[derive(Deserialize)]
struct SeedFile {
    #[serde(default)]
    topics: Vec<Topic>,
}

pub struct SeedLoader;

impl SeedLoader {
    /// The built-in seed corpus.
    pub fn default_topics() -> Result<Vec<Topic>, SeedError> {
        Self::parse(DEFAULT_SEED)
    }

    pub fn load(path: &Path) -> Result<Vec<Topic>, SeedError> {
        let content = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let topics = Self::parse(&content)?;
        info!("Loaded {} seed topics from {}", topics.len(), path.display());
        Ok(topics)
    }

    pub fn parse(content: &str) -> Result<Vec<Topic>, SeedError> {
        let seed: SeedFile = toml::from_str(content)?;
        let mut seen = HashSet::new();
        for topic in &seed.topics {
            if !seen.insert(topic.id.clone()) {
                return Err(SeedError::DuplicateId(topic.id.to_string()));
            }
        }
        Ok(seed.topics)
    }
}

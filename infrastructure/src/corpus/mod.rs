//! Topic corpus adapters
//!
//! [`InMemoryCorpus`] implements the [`TopicCorpus`](salon_application::TopicCorpus)
//! port; [`SeedLoader`] fills it from a TOML seed file.

mod memory;
mod seed;

pub use memory::InMemoryCorpus;
pub use seed::{SeedError, SeedLoader};

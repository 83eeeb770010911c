//! Prompt construction and response interpretation for the content generator.
//!
//! - [`template::PromptTemplate`]: prompts for turns, emergence, discovery, fusion and latent scans
//! - [`parsing`]: tolerant parsers that turn raw generator output into drafts or nothing

pub mod parsing;
pub mod template;

//! Gemini adapter for the content generator port

mod generator;
pub mod protocol;

pub use generator::GeminiContentGenerator;

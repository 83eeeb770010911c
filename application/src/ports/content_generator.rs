//! Content generator port
//!
//! Defines the interface for the natural-language generation backend.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while generating content
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// The generation credential is not configured. Fatal; raised only
    /// while constructing a generator.
    #[error("Missing generation credential: {0} is not set")]
    MissingCredential(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Timeout")]
    Timeout,

    #[error("Empty response")]
    EmptyResponse,

    #[error("Other error: {0}")]
    Other(String),
}

impl GenerationError {
    /// Whether this error must abort startup rather than be recovered.
    pub fn is_fatal(&self) -> bool {
        matches!(self, GenerationError::MissingCredential(_))
    }
}

/// Natural-language generation backend
///
/// This port defines how the application layer asks for text. Implementations
/// (adapters) live in the infrastructure layer and must tolerate concurrent
/// invocation: the orchestrator and the latent link scanner call them
/// independently.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Speak as `persona` about `topic_context`, continuing `transcript`.
    async fn generate_text(
        &self,
        persona: &str,
        topic_context: &str,
        transcript: &str,
    ) -> Result<String, GenerationError>;

    /// Answer a structured prompt with raw JSON text or a negative sentinel.
    async fn generate_structured(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Decorator that bounds every generation call by a timeout.
///
/// A timed-out call yields [`GenerationError::Timeout`] and is otherwise
/// treated like any other generation failure.
pub struct TimeoutGenerator<G> {
    inner: G,
    timeout: Option<Duration>,
}

impl<G: ContentGenerator> TimeoutGenerator<G> {
    pub fn new(inner: G, timeout: Option<Duration>) -> Self {
        Self { inner, timeout }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    async fn bounded<F>(&self, call: F) -> Result<String, GenerationError>
    where
        F: std::future::Future<Output = Result<String, GenerationError>> + Send,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .unwrap_or(Err(GenerationError::Timeout)),
            None => call.await,
        }
    }
}

#[async_trait]
impl<G: ContentGenerator> ContentGenerator for TimeoutGenerator<G> {
    async fn generate_text(
        &self,
        persona: &str,
        topic_context: &str,
        transcript: &str,
    ) -> Result<String, GenerationError> {
        self.bounded(self.inner.generate_text(persona, topic_context, transcript))
            .await
    }

    async fn generate_structured(&self, prompt: &str) -> Result<String, GenerationError> {
        self.bounded(self.inner.generate_structured(prompt)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SlowGenerator(Duration);

    #[async_trait]
    impl ContentGenerator for SlowGenerator {
        async fn generate_text(
            &self,
            _persona: &str,
            _topic_context: &str,
            _transcript: &str,
        ) -> Result<String, GenerationError> {
            tokio::time::sleep(self.0).await;
            Ok("spoken".to_string())
        }

        async fn generate_structured(&self, _prompt: &str) -> Result<String, GenerationError> {
            tokio::time::sleep(self.0).await;
            Ok("NO".to_string())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_maps_to_generation_error() {
        let generator = TimeoutGenerator::new(
            SlowGenerator(Duration::from_secs(60)),
            Some(Duration::from_secs(5)),
        );
        let result = generator.generate_text("p", "t", "s").await;
        assert_eq!(result, Err(GenerationError::Timeout));
    }

    #[tokio::test(start_paused = true)]
    async fn test_fast_call_passes_through() {
        let generator = TimeoutGenerator::new(
            SlowGenerator(Duration::from_millis(10)),
            Some(Duration::from_secs(5)),
        );
        assert_eq!(generator.generate_structured("x").await.unwrap(), "NO");
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_timeout_configured() {
        let generator = TimeoutGenerator::new(SlowGenerator(Duration::from_secs(600)), None);
        assert_eq!(generator.generate_text("p", "t", "s").await.unwrap(), "spoken");
    }

    #[test]
    fn test_only_missing_credential_is_fatal() {
        assert!(GenerationError::MissingCredential("GEMINI_API_KEY".into()).is_fatal());
        assert!(!GenerationError::Timeout.is_fatal());
        assert!(!GenerationError::RequestFailed("500".into()).is_fatal());
    }
}

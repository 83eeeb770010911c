//! Gemini content generator implementation

use super::protocol::{GenerateContentRequest, GenerateContentResponse};
use crate::config::FileGeneratorConfig;
use async_trait::async_trait;
use salon_application::{ContentGenerator, GenerationError};
use salon_domain::PromptTemplate;
use salon_domain::util::ellipsize;
use tracing::{debug, info, trace};

/// Longest error body echoed into a `RequestFailed` message.
const ERROR_BODY_LIMIT: usize = 200;

/// Content generator backed by the Gemini REST API
pub struct GeminiContentGenerator {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiContentGenerator {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Build a generator from configuration, reading the credential from
    /// the configured environment variable.
    ///
    /// Fails with [`GenerationError::MissingCredential`] if it is unset or empty.
    pub fn from_config(config: &FileGeneratorConfig) -> Result<Self, GenerationError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingCredential(config.api_key_env.clone()))?;

        info!("Gemini generator initialized (model: {})", config.model);
        Ok(Self::new(api_key, &config.model, &config.base_url))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    async fn generate(&self, request: GenerateContentRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerationError::Timeout
                } else {
                    GenerationError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                ellipsize(body.trim(), ERROR_BODY_LIMIT)
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Other(format!("Invalid response body: {}", e)))?;

        let text = body.text().ok_or(GenerationError::EmptyResponse)?;
        debug!("Gemini returned {} bytes", text.len());
        Ok(text)
    }
}

#[async_trait]
impl ContentGenerator for GeminiContentGenerator {
    async fn generate_text(
        &self,
        persona: &str,
        topic_context: &str,
        transcript: &str,
    ) -> Result<String, GenerationError> {
        let prompt = PromptTemplate::turn_prompt(persona, topic_context, transcript);
        trace!("Turn prompt:\n{}", prompt);
        self.generate(GenerateContentRequest::text(prompt)).await
    }

    async fn generate_structured(&self, prompt: &str) -> Result<String, GenerationError> {
        trace!("Structured prompt:\n{}", prompt);
        self.generate(GenerateContentRequest::text(prompt).json())
            .await
    }
}

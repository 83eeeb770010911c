//! Content generator configuration from TOML (`[generator]` section)

use serde::{Deserialize, Serialize};

/// Raw generator configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGeneratorConfig {
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    /// Model identifier
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Per-call timeout; 0 disables it
    pub timeout_seconds: u64,
}

impl Default for FileGeneratorConfig {
    fn default() -> Self {
        Self {
            api_key_env: "GEMINI_API_KEY".to_string(),
            model: "gemini-2.5-flash".to_string(),
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            timeout_seconds: 30,
        }
    }
}

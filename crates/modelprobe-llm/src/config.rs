// Connection settings for building a client

use crate::error::Result;
use crate::openai::OpenAIClient;

/// Connection configuration for an OpenAI-compatible endpoint
#[derive(Clone, PartialEq)]
pub struct ClientConfig {
    pub api_key: String,
    /// Base URL for the API (optional, defaults to https://api.openai.com/v1)
    pub base_url: Option<String>,
    /// Disable TLS certificate verification
    pub allow_insecure_tls: bool,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            allow_insecure_tls: false,
        }
    }

    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        self.base_url = base_url;
        self
    }

    pub fn with_insecure_tls(mut self, allow: bool) -> Self {
        self.allow_insecure_tls = allow;
        self
    }

    pub fn build_client(&self) -> Result<OpenAIClient> {
        OpenAIClient::from_config(self)
    }
}

// Keep the key out of logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("allow_insecure_tls", &self.allow_insecure_tls)
            .finish()
    }
}

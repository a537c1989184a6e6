// OpenAI-specific client implementation

use crate::buffer_utils::parse_sse_stream;
use crate::config::ClientConfig;
use crate::error::{LlmError, Result};
use crate::streaming::ResponseStream;
use crate::traits::{ResponseRequest, ResponsesClient};
use crate::types::{Content, ContentPart, Message};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// OpenAI client (HTTP direct, no SDK)
#[derive(Debug)]
pub struct OpenAIClient {
    http_client: reqwest::Client,
    base_url: String,
    insecure: bool,
}

impl OpenAIClient {
    /// Create a client against the default endpoint with TLS verification on
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder().api_key(api_key).build()
    }

    pub fn builder() -> OpenAIClientBuilder {
        OpenAIClientBuilder::default()
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = Self::builder().api_key(config.api_key.clone());
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url.clone());
        }
        builder
            .danger_accept_invalid_certs(config.allow_insecure_tls)
            .build()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// True when certificate verification is disabled
    pub fn is_insecure(&self) -> bool {
        self.insecure
    }

    /// Build responses request payload
    pub(crate) fn build_response_request(&self, request: ResponseRequest, stream: bool) -> Value {
        let input: Vec<Value> = request
            .input
            .into_iter()
            .map(|msg| self.convert_message(msg))
            .collect();

        let mut payload = serde_json::json!({
            "model": request.model,
            "input": input,
            "store": request.store,
            "stream": stream,
        });

        if let (Some(instructions), Some(obj)) = (request.instructions, payload.as_object_mut()) {
            obj.insert("instructions".to_string(), Value::String(instructions));
        }

        payload
    }

    /// Convert our Message type to Responses API input format
    fn convert_message(&self, message: Message) -> Value {
        match message {
            Message::System { content } => {
                let mut obj = serde_json::Map::new();
                obj.insert("role".to_string(), Value::String("system".to_string()));
                if let Some(content) = content {
                    obj.insert("content".to_string(), self.convert_content(content));
                }
                Value::Object(obj)
            }
            Message::Human { content } => serde_json::json!({
                "role": "user",
                "content": self.convert_content(content),
            }),
        }
    }

    /// Convert Content to Responses API format (string or parts array)
    fn convert_content(&self, content: Content) -> Value {
        match content {
            Content::Text(s) => Value::String(s),
            Content::Parts(parts) => {
                let converted: Vec<Value> = parts
                    .into_iter()
                    .map(|part| match part {
                        ContentPart::InputText { text } => serde_json::json!({
                            "type": "input_text",
                            "text": text,
                        }),
                    })
                    .collect();
                Value::Array(converted)
            }
        }
    }
}

/// Builder for OpenAIClient
#[derive(Default)]
pub struct OpenAIClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    danger_accept_invalid_certs: bool,
}

impl OpenAIClientBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the API base URL
    /// Example: "https://proxy.internal/v1"
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Skip TLS certificate verification. Off unless set to true.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.danger_accept_invalid_certs = accept;
        self
    }

    pub fn build(self) -> Result<OpenAIClient> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .ok_or_else(|| LlmError::InvalidConfig("API key is required".to_string()))?;

        let base_url = self
            .base_url
            .as_deref()
            .unwrap_or(OPENAI_API_BASE)
            .trim_end_matches('/')
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|_| LlmError::InvalidConfig("Invalid API key format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let mut http_client = reqwest::Client::builder().default_headers(headers);
        if self.danger_accept_invalid_certs {
            tracing::warn!("TLS certificate verification disabled");
            http_client = http_client.danger_accept_invalid_certs(true);
        }
        let http_client = http_client.build()?;

        Ok(OpenAIClient {
            http_client,
            base_url,
            insecure: self.danger_accept_invalid_certs,
        })
    }
}

// ============================================================================
// TRAIT IMPLEMENTATIONS
// ============================================================================

#[async_trait]
impl ResponsesClient for OpenAIClient {
    async fn stream_response(&self, request: ResponseRequest) -> Result<ResponseStream> {
        let model = request.model.clone();
        let payload = self.build_response_request(request, true);
        let url = format!("{}/responses", self.base_url);

        tracing::debug!(%url, %model, "opening response stream");

        let response = self.http_client.post(&url).json(&payload).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status,
                message: api_error_message(&error_text),
            });
        }

        Ok(ResponseStream::new(parse_sse_stream(response.bytes_stream())))
    }
}

/// Pull `error.message` out of an OpenAI error body, else return it as-is
fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

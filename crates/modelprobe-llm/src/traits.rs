use crate::error::Result;
use crate::streaming::ResponseStream;
use crate::types::Message;
use async_trait::async_trait;

/// Streaming access to the Responses API.
///
/// The probe only needs one call shape; tests swap in their own
/// implementation to observe the request and feed synthetic events.
#[async_trait]
pub trait ResponsesClient: Send + Sync {
    /// Open a streaming response. The returned handle owns the connection.
    async fn stream_response(&self, request: ResponseRequest) -> Result<ResponseStream>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseRequest {
    pub model: String,
    pub input: Vec<Message>,
    pub instructions: Option<String>,
    /// Whether the server may retain the conversation
    pub store: bool,
}

impl ResponseRequest {
    /// New request with storage disabled
    pub fn new(model: impl Into<String>, input: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            input,
            instructions: None,
            store: false,
        }
    }

    pub fn with_instructions(mut self, instructions: Option<String>) -> Self {
        self.instructions = instructions;
        self
    }

    pub fn with_store(mut self, store: bool) -> Self {
        self.store = store;
        self
    }
}

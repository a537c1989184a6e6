use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("OpenAI API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed stream event: {0}")]
    MalformedEvent(String),

    #[error("Stream error{}: {message}", .code.as_deref().map(|c| format!(" [{}]", c)).unwrap_or_default())]
    Stream {
        code: Option<String>,
        message: String,
    },

    #[error("Response failed: {0}")]
    ResponseFailed(String),

    #[error("Stream ended without a response.completed event")]
    Incomplete,

    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LlmError {
    /// True for HTTP 401/403 responses
    pub fn is_auth(&self) -> bool {
        matches!(self, LlmError::Api { status: 401 | 403, .. })
    }
}

pub type Result<T> = std::result::Result<T, LlmError>;

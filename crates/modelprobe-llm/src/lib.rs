pub mod buffer_utils;
pub mod config;
pub mod error;
pub mod openai;
pub mod streaming;
pub mod traits;
pub mod types;

pub use config::ClientConfig;
pub use error::{LlmError, Result};
pub use openai::{OpenAIClient, ResponseStreamEvent, ResponsesResponse};
pub use streaming::ResponseStream;
pub use traits::{ResponseRequest, ResponsesClient};
pub use types::{Content, ContentPart, Message};

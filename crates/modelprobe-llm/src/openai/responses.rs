// OpenAI Responses API
// https://platform.openai.com/docs/api-reference/responses

use serde::{Deserialize, Serialize};

/// Response object from /v1/responses
///
/// Every field is optional on the wire: the same shape arrives inside
/// `response.created` (mostly empty) and `response.completed` (filled in).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub output: Vec<OutputItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

/// Item in the output array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputItem {
    Reasoning {
        #[serde(default)]
        summary: Vec<SummaryText>,
    },
    Message {
        #[serde(default)]
        content: Vec<OutputContent>,
    },
    #[serde(other)]
    Other,
}

/// Summary text for reasoning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryText {
    #[serde(default)]
    pub text: String,
}

/// Content item in message output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutputContent {
    OutputText {
        text: String,
    },
    Refusal {
        refusal: String,
    },
    #[serde(other)]
    Other,
}

/// Usage stats
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tokens_details: Option<OutputTokensDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputTokensDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub message: String,
}

impl ResponsesResponse {
    /// Get all message text (concatenated)
    pub fn message_text(&self) -> Option<String> {
        let message_texts: Vec<String> = self
            .output
            .iter()
            .filter_map(|item| match item {
                OutputItem::Message { content } => {
                    let text = content
                        .iter()
                        .filter_map(|c| match c {
                            OutputContent::OutputText { text } => Some(text.as_str()),
                            _ => None,
                        })
                        .collect::<Vec<_>>()
                        .join("");
                    if text.is_empty() {
                        None
                    } else {
                        Some(text)
                    }
                }
                _ => None,
            })
            .collect();

        if message_texts.is_empty() {
            None
        } else {
            Some(message_texts.join("\n"))
        }
    }

    pub fn reasoning_tokens(&self) -> Option<u32> {
        self.usage
            .as_ref()
            .and_then(|u| u.output_tokens_details.as_ref())
            .and_then(|d| d.reasoning_tokens)
    }
}

// ============================================================================
// STREAMING TYPES
// ============================================================================

/// One event from /v1/responses with stream=true.
///
/// Event kinds this crate does not know about deserialize to `Unknown`.
/// A known kind with a missing or ill-typed field is a parse error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResponseStreamEvent {
    #[serde(rename = "response.created")]
    Created { response: ResponsesResponse },

    #[serde(rename = "response.in_progress")]
    InProgress { response: ResponsesResponse },

    #[serde(rename = "response.output_text.delta")]
    OutputTextDelta {
        delta: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        item_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        output_index: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        content_index: Option<u32>,
    },

    #[serde(rename = "response.completed")]
    Completed { response: ResponsesResponse },

    #[serde(rename = "response.incomplete")]
    Incomplete { response: ResponsesResponse },

    #[serde(rename = "response.failed")]
    Failed { response: ResponsesResponse },

    #[serde(rename = "error")]
    Error {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        code: Option<String>,
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        param: Option<String>,
    },

    #[serde(other)]
    Unknown,
}

impl ResponseStreamEvent {
    /// Text-delta event with no positional metadata
    pub fn text_delta(delta: impl Into<String>) -> Self {
        Self::OutputTextDelta {
            delta: delta.into(),
            item_id: None,
            output_index: None,
            content_index: None,
        }
    }

    pub fn completed(response: ResponsesResponse) -> Self {
        Self::Completed { response }
    }

    /// Wire name of the event kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "response.created",
            Self::InProgress { .. } => "response.in_progress",
            Self::OutputTextDelta { .. } => "response.output_text.delta",
            Self::Completed { .. } => "response.completed",
            Self::Incomplete { .. } => "response.incomplete",
            Self::Failed { .. } => "response.failed",
            Self::Error { .. } => "error",
            Self::Unknown => "unknown",
        }
    }
}

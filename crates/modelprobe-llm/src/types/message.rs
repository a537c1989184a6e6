use serde::{Deserialize, Serialize};
use super::content::Content;

/// Input message for the Responses API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// System prompt. `content` is omitted from the wire when absent.
    System {
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<Content>,
    },

    #[serde(rename = "user")]
    Human {
        content: Content,
    },
}

impl Message {
    pub fn system(content: impl Into<Content>) -> Self {
        Self::System {
            content: Some(content.into()),
        }
    }

    /// System message that carries no prompt
    pub fn empty_system() -> Self {
        Self::System { content: None }
    }

    pub fn human(content: impl Into<Content>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    pub fn role(&self) -> &str {
        match self {
            Self::System { .. } => "system",
            Self::Human { .. } => "user",
        }
    }

    pub fn content(&self) -> Option<&Content> {
        match self {
            Self::System { content } => content.as_ref(),
            Self::Human { content } => Some(content),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Chat message. Serializes directly into the chat-completions wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Message {
    /// System prompt (instructions)
    System { content: String },

    /// User message
    #[serde(rename = "user")]
    Human { content: String },

    /// Assistant message
    #[serde(rename = "assistant")]
    AI { content: String },
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self::System {
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self::Human {
            content: content.into(),
        }
    }

    pub fn ai(content: impl Into<String>) -> Self {
        Self::AI {
            content: content.into(),
        }
    }

    /// Get role as string
    pub fn role(&self) -> &str {
        match self {
            Self::System { .. } => "system",
            Self::Human { .. } => "user",
            Self::AI { .. } => "assistant",
        }
    }

    pub fn content(&self) -> &str {
        match self {
            Self::System { content } | Self::Human { content } | Self::AI { content } => content,
        }
    }
}

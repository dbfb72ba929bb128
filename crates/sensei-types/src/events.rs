use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::search::{Medium, WebResult};
use crate::tags::TurnMetadata;

pub type EventSender = mpsc::Sender<TurnEvent>;

/// Event emitted on the output channel while a turn runs.
///
/// Serialized as `{"type": <name>, "data": <payload>}`; transports that carry
/// the name out of band use [`TurnEvent::name`] and [`TurnEvent::data`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum TurnEvent {
    WebResults(Vec<WebResult>),

    MediumResults(Vec<Medium>),

    Metadata(TurnMetadata),

    /// One answer fragment, in generation order
    Answer(String),

    RelatedQuestions(Vec<String>),

    /// Only sent on the first turn of a thread
    ThreadMetadata(NewThreadInfo),

    /// Terminal. Nothing follows it.
    AppError { message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewThreadInfo {
    pub created_at: DateTime<Utc>,
    pub slug: String,
    pub name: String,
}

impl TurnEvent {
    pub fn app_error(message: impl Into<String>) -> Self {
        Self::AppError {
            message: message.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::WebResults(_) => "web_results",
            Self::MediumResults(_) => "medium_results",
            Self::Metadata(_) => "metadata",
            Self::Answer(_) => "answer",
            Self::RelatedQuestions(_) => "related_questions",
            Self::ThreadMetadata(_) => "thread_metadata",
            Self::AppError { .. } => "app_error",
        }
    }

    /// Payload without the type tag
    pub fn data(&self) -> serde_json::Value {
        match serde_json::to_value(self) {
            Ok(mut value) => value["data"].take(),
            Err(_) => serde_json::Value::Null,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::AppError { .. })
    }
}

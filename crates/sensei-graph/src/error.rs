use sensei_persist::PersistError;
use sensei_search::SearchError;
use sensei_types::TurnEvent;
use tokio::sync::mpsc::error::SendError;

pub const ACCESS_DENIED_MESSAGE: &str = "You do not have access to this resource.";
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request.";

/// Reasons a turn stops early.
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    /// The thread belongs to another user
    #[error("user {user_id} does not have access to thread {thread_id}")]
    AccessDenied { thread_id: String, user_id: String },

    /// A completion came back without a body
    #[error("empty response from {0}")]
    EmptyUpstream(&'static str),

    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("history store error: {0}")]
    Store(#[from] PersistError),

    /// The receiving side of the output channel went away
    #[error("output channel closed")]
    ChannelClosed,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<SendError<TurnEvent>> for TurnError {
    fn from(_: SendError<TurnEvent>) -> Self {
        TurnError::ChannelClosed
    }
}

impl TurnError {
    /// Text shown to the client. Only access denial is surfaced verbatim.
    pub fn client_message(&self) -> &'static str {
        match self {
            TurnError::AccessDenied { .. } => ACCESS_DENIED_MESSAGE,
            _ => GENERIC_ERROR_MESSAGE,
        }
    }
}

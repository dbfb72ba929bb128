use serde::{Deserialize, Serialize};

/// One user request: a query on a thread, by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnInput {
    pub thread_id: String,
    pub user_id: String,
    pub query: String,
}

impl TurnInput {
    pub fn new(
        thread_id: impl Into<String>,
        user_id: impl Into<String>,
        query: impl Into<String>,
    ) -> Self {
        Self {
            thread_id: thread_id.into(),
            user_id: user_id.into(),
            query: query.into(),
        }
    }
}

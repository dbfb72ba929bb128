use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Turn;

/// Per-thread record. Created on the first turn, afterwards only replaced
/// wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadMetadata {
    pub thread_id: String,
    pub name: String,
    /// Owner; the only user allowed to add turns
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub slug: String,
    #[serde(default)]
    pub related_questions: Vec<String>,
}

impl ThreadMetadata {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

/// A thread as served by the read API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thread {
    pub thread_id: String,
    pub metadata: ThreadMetadata,
    pub chat_history: Vec<Turn>,
}

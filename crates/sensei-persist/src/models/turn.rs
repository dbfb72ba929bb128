use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sensei_types::{Medium, TurnMetadata, WebResult};

/// One completed query/answer exchange. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: String,
    pub thread_id: String,
    pub query: String,
    pub answer: String,
    #[serde(default)]
    pub web_results: Vec<WebResult>,
    #[serde(default)]
    pub mediums: Vec<Medium>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<TurnMetadata>,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    pub fn new(thread_id: impl Into<String>, query: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            thread_id: thread_id.into(),
            query: query.into(),
            answer: answer.into(),
            web_results: Vec::new(),
            mediums: Vec::new(),
            metadata: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_web_results(mut self, web_results: Vec<WebResult>) -> Self {
        self.web_results = web_results;
        self
    }

    pub fn with_mediums(mut self, mediums: Vec<Medium>) -> Self {
        self.mediums = mediums;
        self
    }

    pub fn with_metadata(mut self, metadata: Option<TurnMetadata>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

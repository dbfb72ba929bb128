use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sensei_types::{Medium, TurnMetadata, WebResult};

use crate::models::{ThreadMetadata, Turn};

/// Document in `turns`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoTurn {
    #[serde(rename = "_id")]
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
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

/// Document in `thread_metadata`, keyed by thread id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoThreadMetadata {
    #[serde(rename = "_id")]
    pub thread_id: String,
    pub name: String,
    pub user_id: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    pub slug: String,
    #[serde(default)]
    pub related_questions: Vec<String>,
}

/// Document in `slug_index`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoSlug {
    #[serde(rename = "_id")]
    pub slug: String,
    pub thread_id: String,
}

impl From<Turn> for MongoTurn {
    fn from(turn: Turn) -> Self {
        Self {
            id: turn.id,
            thread_id: turn.thread_id,
            query: turn.query,
            answer: turn.answer,
            web_results: turn.web_results,
            mediums: turn.mediums,
            metadata: turn.metadata,
            created_at: turn.created_at,
        }
    }
}

impl From<MongoTurn> for Turn {
    fn from(doc: MongoTurn) -> Self {
        Self {
            id: doc.id,
            thread_id: doc.thread_id,
            query: doc.query,
            answer: doc.answer,
            web_results: doc.web_results,
            mediums: doc.mediums,
            metadata: doc.metadata,
            created_at: doc.created_at,
        }
    }
}

impl From<&ThreadMetadata> for MongoThreadMetadata {
    fn from(meta: &ThreadMetadata) -> Self {
        Self {
            thread_id: meta.thread_id.clone(),
            name: meta.name.clone(),
            user_id: meta.user_id.clone(),
            created_at: meta.created_at,
            slug: meta.slug.clone(),
            related_questions: meta.related_questions.clone(),
        }
    }
}

impl From<MongoThreadMetadata> for ThreadMetadata {
    fn from(doc: MongoThreadMetadata) -> Self {
        Self {
            thread_id: doc.thread_id,
            name: doc.name,
            user_id: doc.user_id,
            created_at: doc.created_at,
            slug: doc.slug,
            related_questions: doc.related_questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_document_shape() {
        let turn = Turn::new("t1", "capital of France?", "Paris [1].")
            .with_mediums(vec![Medium::Video { url: "https://v.example".to_string() }]);
        let id = turn.id.clone();

        let doc = bson::to_document(&MongoTurn::from(turn)).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), id);
        assert!(doc.get_datetime("created_at").is_ok());
        assert!(!doc.contains_key("metadata"));
        let mediums = doc.get_array("mediums").unwrap();
        assert_eq!(
            mediums[0].as_document().unwrap().get_str("medium").unwrap(),
            "video"
        );
    }

    #[test]
    fn test_metadata_keyed_by_thread_id() {
        let meta = ThreadMetadata {
            thread_id: "t1".to_string(),
            name: "n".to_string(),
            user_id: "A".to_string(),
            created_at: Utc::now(),
            slug: "n-1".to_string(),
            related_questions: vec![],
        };

        let doc = bson::to_document(&MongoThreadMetadata::from(&meta)).unwrap();
        assert_eq!(doc.get_str("_id").unwrap(), "t1");
        assert!(!doc.contains_key("thread_id"));
    }
}

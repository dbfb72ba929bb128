use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{ThreadMetadata, Turn};
use crate::store::HistoryStore;

/// Process-local store for development and tests. Nothing survives a restart.
#[derive(Default)]
pub struct InMemoryHistoryStore {
    turns: RwLock<HashMap<String, Vec<Turn>>>,
    metadata: RwLock<HashMap<String, ThreadMetadata>>,
    slugs: RwLock<HashMap<String, String>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored turns across all threads
    pub async fn turn_count(&self) -> usize {
        self.turns.read().await.values().map(Vec::len).sum()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn load_recent_turns(&self, thread_id: &str, limit: usize) -> Result<Vec<Turn>> {
        let turns = self.turns.read().await;
        let log = turns.get(thread_id).map(Vec::as_slice).unwrap_or_default();
        let start = log.len().saturating_sub(limit);
        Ok(log[start..].to_vec())
    }

    async fn load_turns(&self, thread_id: &str) -> Result<Vec<Turn>> {
        Ok(self.turns.read().await.get(thread_id).cloned().unwrap_or_default())
    }

    async fn append_turn(&self, turn: Turn) -> Result<()> {
        self.turns
            .write()
            .await
            .entry(turn.thread_id.clone())
            .or_default()
            .push(turn);
        Ok(())
    }

    async fn get_thread_metadata(&self, thread_id: &str) -> Result<Option<ThreadMetadata>> {
        Ok(self.metadata.read().await.get(thread_id).cloned())
    }

    async fn put_thread_metadata(&self, metadata: &ThreadMetadata) -> Result<()> {
        self.metadata
            .write()
            .await
            .insert(metadata.thread_id.clone(), metadata.clone());
        Ok(())
    }

    async fn put_slug(&self, slug: &str, thread_id: &str) -> Result<()> {
        self.slugs
            .write()
            .await
            .insert(slug.to_string(), thread_id.to_string());
        Ok(())
    }

    async fn thread_id_by_slug(&self, slug: &str) -> Result<Option<String>> {
        Ok(self.slugs.read().await.get(slug).cloned())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn metadata(thread_id: &str, slug: &str) -> ThreadMetadata {
        ThreadMetadata {
            thread_id: thread_id.to_string(),
            name: "What is the capital of France?".to_string(),
            user_id: "A".to_string(),
            created_at: Utc::now(),
            slug: slug.to_string(),
            related_questions: vec![],
        }
    }

    #[tokio::test]
    async fn test_recent_turns_window_oldest_first() {
        let store = InMemoryHistoryStore::new();
        let start = Utc::now();
        for i in 0..5 {
            let turn = Turn::new("t1", format!("q{i}"), format!("a{i}"))
                .with_created_at(start + Duration::seconds(i));
            store.append_turn(turn).await.unwrap();
        }
        store.append_turn(Turn::new("t2", "other", "x")).await.unwrap();

        let recent = store.load_recent_turns("t1", 3).await.unwrap();
        assert_eq!(
            recent.iter().map(|t| t.query.as_str()).collect::<Vec<_>>(),
            vec!["q2", "q3", "q4"]
        );
        assert_eq!(store.load_turns("t1").await.unwrap().len(), 5);
        assert!(store.load_recent_turns("missing", 3).await.unwrap().is_empty());
        assert_eq!(store.turn_count().await, 6);
    }

    #[tokio::test]
    async fn test_metadata_is_replaced_wholesale() {
        let store = InMemoryHistoryStore::new();
        let mut meta = metadata("t1", "capital-of-france-1");
        meta.related_questions = vec!["What is the population of Paris?".to_string()];
        store.save_thread_metadata(&meta).await.unwrap();

        let replacement = metadata("t1", "capital-of-france-1");
        store.put_thread_metadata(&replacement).await.unwrap();

        let loaded = store.get_thread_metadata("t1").await.unwrap().unwrap();
        assert!(loaded.related_questions.is_empty());
    }

    #[tokio::test]
    async fn test_get_thread_by_slug() {
        let store = InMemoryHistoryStore::new();
        store.save_thread_metadata(&metadata("t1", "capital-of-france-1")).await.unwrap();
        store.append_turn(Turn::new("t1", "capital of France?", "Paris [1].")).await.unwrap();

        let thread = store.get_thread_by_slug("capital-of-france-1").await.unwrap().unwrap();
        assert_eq!(thread.thread_id, "t1");
        assert_eq!(thread.chat_history.len(), 1);
        assert!(thread.metadata.is_owned_by("A"));

        assert!(store.get_thread_by_slug("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_slug_without_record_reads_as_missing() {
        let store = InMemoryHistoryStore::new();
        store.put_slug("orphan", "t9").await.unwrap();

        assert!(store.get_thread_by_slug("orphan").await.unwrap().is_none());
    }
}

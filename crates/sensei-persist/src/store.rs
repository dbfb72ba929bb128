use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Thread, ThreadMetadata, Turn};

/// Conversation history store.
///
/// Turns form an append-only log per thread. Thread metadata is a single
/// record per thread, replaced wholesale. Slugs map to thread ids through a
/// separate index.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Most recent `limit` turns, oldest first
    async fn load_recent_turns(&self, thread_id: &str, limit: usize) -> Result<Vec<Turn>>;

    /// Every turn of the thread, oldest first
    async fn load_turns(&self, thread_id: &str) -> Result<Vec<Turn>>;

    async fn append_turn(&self, turn: Turn) -> Result<()>;

    async fn get_thread_metadata(&self, thread_id: &str) -> Result<Option<ThreadMetadata>>;

    /// Replace the metadata record (no merge)
    async fn put_thread_metadata(&self, metadata: &ThreadMetadata) -> Result<()>;

    async fn put_slug(&self, slug: &str, thread_id: &str) -> Result<()>;

    async fn thread_id_by_slug(&self, slug: &str) -> Result<Option<String>>;

    /// Backend name for logs and health output
    fn backend(&self) -> &'static str;

    /// Cheap connectivity probe
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Write the metadata record, then the slug index entry.
    ///
    /// The two writes are independent: if the second fails the record exists
    /// without a slug entry and the thread is not reachable by slug.
    async fn save_thread_metadata(&self, metadata: &ThreadMetadata) -> Result<()> {
        self.put_thread_metadata(metadata).await?;
        self.put_slug(&metadata.slug, &metadata.thread_id).await
    }

    /// Resolve a slug and load metadata plus full history.
    async fn get_thread_by_slug(&self, slug: &str) -> Result<Option<Thread>> {
        let Some(thread_id) = self.thread_id_by_slug(slug).await? else {
            return Ok(None);
        };

        let (metadata, chat_history) = tokio::try_join!(
            self.get_thread_metadata(&thread_id),
            self.load_turns(&thread_id),
        )?;

        Ok(metadata.map(|metadata| Thread {
            thread_id,
            metadata,
            chat_history,
        }))
    }
}

use async_trait::async_trait;
use mongodb::{bson::doc, Client};

use crate::dbs::mongo::models::{MongoSlug, MongoThreadMetadata, MongoTurn};
use crate::dbs::mongo::repositories::{MongoThreadRepository, MongoTurnRepository};
use crate::error::{PersistError, Result};
use crate::models::{ThreadMetadata, Turn};
use crate::store::HistoryStore;

pub struct MongoHistoryStore {
    client: Client,
    database: String,
    turn_repo: MongoTurnRepository,
    thread_repo: MongoThreadRepository,
}

impl MongoHistoryStore {
    /// Connect to MongoDB and make sure the turn index exists
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let turn_repo = MongoTurnRepository::new(&client, database);
        let thread_repo = MongoThreadRepository::new(&client, database);

        turn_repo.ensure_indexes().await?;

        Ok(Self {
            client,
            database: database.to_string(),
            turn_repo,
            thread_repo,
        })
    }
}

#[async_trait]
impl HistoryStore for MongoHistoryStore {
    async fn load_recent_turns(&self, thread_id: &str, limit: usize) -> Result<Vec<Turn>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let turns = self.turn_repo.recent(thread_id, limit).await?;
        Ok(turns.into_iter().map(Turn::from).collect())
    }

    async fn load_turns(&self, thread_id: &str) -> Result<Vec<Turn>> {
        let turns = self.turn_repo.all(thread_id).await?;
        Ok(turns.into_iter().map(Turn::from).collect())
    }

    async fn append_turn(&self, turn: Turn) -> Result<()> {
        self.turn_repo.insert(&MongoTurn::from(turn)).await
    }

    async fn get_thread_metadata(&self, thread_id: &str) -> Result<Option<ThreadMetadata>> {
        let record = self.thread_repo.get_metadata(thread_id).await?;
        Ok(record.map(ThreadMetadata::from))
    }

    async fn put_thread_metadata(&self, metadata: &ThreadMetadata) -> Result<()> {
        self.thread_repo
            .replace_metadata(&MongoThreadMetadata::from(metadata))
            .await
    }

    async fn put_slug(&self, slug: &str, thread_id: &str) -> Result<()> {
        self.thread_repo
            .put_slug(&MongoSlug {
                slug: slug.to_string(),
                thread_id: thread_id.to_string(),
            })
            .await
    }

    async fn thread_id_by_slug(&self, slug: &str) -> Result<Option<String>> {
        self.thread_repo.thread_id_by_slug(slug).await
    }

    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn ping(&self) -> Result<()> {
        self.client
            .database(&self.database)
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

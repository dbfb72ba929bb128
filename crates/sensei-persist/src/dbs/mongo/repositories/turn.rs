use futures::TryStreamExt;
use mongodb::{bson::doc, Client, Collection, IndexModel};

use crate::dbs::mongo::models::MongoTurn;
use crate::error::Result;

#[derive(Clone)]
pub struct MongoTurnRepository {
    collection: Collection<MongoTurn>,
}

impl MongoTurnRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let collection = client.database(db_name).collection("turns");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "thread_id": 1, "created_at": 1 })
            .build();
        self.collection.create_index(index).await?;
        Ok(())
    }

    pub async fn insert(&self, turn: &MongoTurn) -> Result<()> {
        self.collection.insert_one(turn).await?;
        Ok(())
    }

    /// Last `limit` turns, returned oldest first
    pub async fn recent(&self, thread_id: &str, limit: i64) -> Result<Vec<MongoTurn>> {
        let mut turns: Vec<MongoTurn> = self
            .collection
            .find(doc! { "thread_id": thread_id })
            .sort(doc! { "created_at": -1 })
            .limit(limit)
            .await?
            .try_collect()
            .await?;
        turns.reverse();
        Ok(turns)
    }

    pub async fn all(&self, thread_id: &str) -> Result<Vec<MongoTurn>> {
        let turns = self
            .collection
            .find(doc! { "thread_id": thread_id })
            .sort(doc! { "created_at": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(turns)
    }
}

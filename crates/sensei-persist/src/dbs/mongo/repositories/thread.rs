use mongodb::{bson::doc, Client, Collection};

use crate::dbs::mongo::models::{MongoSlug, MongoThreadMetadata};
use crate::error::Result;

/// Thread metadata records and the slug index.
#[derive(Clone)]
pub struct MongoThreadRepository {
    metadata: Collection<MongoThreadMetadata>,
    slugs: Collection<MongoSlug>,
}

impl MongoThreadRepository {
    pub fn new(client: &Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self {
            metadata: db.collection("thread_metadata"),
            slugs: db.collection("slug_index"),
        }
    }

    pub async fn get_metadata(&self, thread_id: &str) -> Result<Option<MongoThreadMetadata>> {
        Ok(self.metadata.find_one(doc! { "_id": thread_id }).await?)
    }

    /// Replace the whole record, inserting it if missing
    pub async fn replace_metadata(&self, record: &MongoThreadMetadata) -> Result<()> {
        self.metadata
            .replace_one(doc! { "_id": record.thread_id.as_str() }, record)
            .upsert(true)
            .await?;
        Ok(())
    }

    pub async fn put_slug(&self, entry: &MongoSlug) -> Result<()> {
        self.slugs
            .replace_one(doc! { "_id": entry.slug.as_str() }, entry)
            .upsert(true)
            .await?;
        Ok(())
    }

    pub async fn thread_id_by_slug(&self, slug: &str) -> Result<Option<String>> {
        let entry = self.slugs.find_one(doc! { "_id": slug }).await?;
        Ok(entry.map(|e| e.thread_id))
    }
}

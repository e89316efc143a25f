//! Shared MongoDB access for the repositories.

use anyhow::Result;
use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::{Document, doc};
use mongodb::options::FindOptions;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::database::Database;

/// A collection of documents keyed by their `id` field.
pub(super) struct MongoTable<D>
where
    D: Send + Sync,
{
    collection: Collection<D>,
    sort: Document,
}

impl<D> MongoTable<D>
where
    D: Serialize + DeserializeOwned + Send + Sync + Unpin,
{
    pub fn new(db: &Database, name: &str, sort_field: &str) -> Self {
        Self {
            collection: db.collection(name),
            sort: doc! { sort_field: 1 },
        }
    }

    /// Documents matching `filter`, in sort order.
    pub async fn find(&self, filter: Document) -> Result<Vec<D>> {
        let options = FindOptions::builder().sort(self.sort.clone()).build();
        let cursor = self.collection.find(filter).with_options(options).await?;
        Ok(cursor.try_collect::<Vec<D>>().await?)
    }

    pub async fn find_one(&self, filter: Document) -> Result<Option<D>> {
        Ok(self.collection.find_one(filter).await?)
    }

    pub async fn get(&self, id: &str) -> Result<Option<D>> {
        self.find_one(doc! { "id": id }).await
    }

    pub async fn insert(&self, document: &D) -> Result<()> {
        self.collection.insert_one(document).await?;
        Ok(())
    }

    pub async fn replace(&self, id: &str, document: &D) -> Result<bool> {
        let result = self.collection.replace_one(doc! { "id": id }, document).await?;
        Ok(result.matched_count > 0)
    }

    pub async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}

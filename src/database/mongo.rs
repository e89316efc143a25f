//! MongoDB database wrapper.

use mongodb::bson::doc;
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::{debug, info};

use super::models::{BibleStudy, EventRecord, UserRecord, VerseRecord};
use super::store::Record;

/// Database wrapper for MongoDB operations.
#[derive(Debug, Clone)]
pub struct Database {
    db: mongodb::Database,
}

impl Database {
    /// Connect to MongoDB with the given URI and database name.
    ///
    /// # Arguments
    /// * `uri` - MongoDB connection string
    /// * `db_name` - Database name to use
    ///
    /// # Errors
    /// Returns error if connection fails.
    pub async fn connect(uri: &str, db_name: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(uri).await?;
        let client = Client::with_options(options)?;

        // Ping the database to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Successfully connected to MongoDB");

        let db = client.database(db_name);

        Ok(Self { db })
    }

    /// Get a typed collection from the database.
    ///
    /// # Arguments
    /// * `name` - Collection name
    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    /// Create the indexes the repositories query by.
    ///
    /// Every collection gets a unique index on `id` and a plain index on its
    /// sort field. Creating an existing index is a no-op.
    ///
    /// The `id` index is sparse: rows written before ids were assigned have
    /// no `id` field and must not collide with each other.
    pub async fn ensure_indexes(&self) -> anyhow::Result<()> {
        self.index_collection::<VerseRecord>().await?;
        self.index_collection::<EventRecord>().await?;
        self.index_collection::<BibleStudy>().await?;
        self.index_collection::<UserRecord>().await?;

        self.collection::<UserRecord>(UserRecord::COLLECTION)
            .create_index(IndexModel::builder().keys(doc! { "token": 1 }).build())
            .await?;

        info!("Indexes ensured");
        Ok(())
    }

    async fn index_collection<T: Record>(&self) -> anyhow::Result<()> {
        let collection = self.collection::<mongodb::bson::Document>(T::COLLECTION);

        collection.create_index(unique_id_index()).await?;

        let sort_field = T::SORT_FIELD;
        collection
            .create_index(IndexModel::builder().keys(doc! { sort_field: 1 }).build())
            .await?;

        debug!("Indexed collection {}", T::COLLECTION);
        Ok(())
    }
}

fn unique_id_index() -> IndexModel {
    IndexModel::builder()
        .keys(doc! { "id": 1 })
        .options(IndexOptions::builder().unique(true).sparse(true).build())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_index_skips_rows_without_id() {
        let index = unique_id_index();
        assert_eq!(index.keys, doc! { "id": 1 });

        let options = index.options.unwrap();
        assert_eq!(options.unique, Some(true));
        assert_eq!(options.sparse, Some(true));
    }
}

//! Event repository.
//!
//! Events are stored as `EventDocument` (BSON date timestamps) and handed
//! out as `EventRecord`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mongodb::bson::{self, doc};
use tracing::debug;

use super::table::MongoTable;
use crate::database::models::{EventDocument, EventRecord};
use crate::database::store::{EventStore, Record, RecordStore};
use crate::database::Database;

/// Repository for the `events` collection.
pub struct EventRepository {
    table: MongoTable<EventDocument>,
}

impl EventRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db, EventRecord::COLLECTION, EventRecord::SORT_FIELD),
        }
    }
}

#[async_trait]
impl RecordStore<EventRecord> for EventRepository {
    async fn list(&self) -> Result<Vec<EventRecord>> {
        let docs = self.table.find(doc! {}).await?;
        Ok(docs.into_iter().map(EventRecord::from).collect())
    }

    async fn get(&self, id: &str) -> Result<Option<EventRecord>> {
        Ok(self.table.get(id).await?.map(EventRecord::from))
    }

    async fn insert(&self, record: &EventRecord) -> Result<()> {
        self.table.insert(&EventDocument::from(record)).await
    }

    async fn replace(&self, record: &EventRecord) -> Result<bool> {
        self.table.replace(&record.id, &EventDocument::from(record)).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.table.delete(id).await
    }
}

#[async_trait]
impl EventStore for EventRepository {
    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<EventRecord>> {
        let mut range = doc! { "$gte": bson::DateTime::from_millis(start.timestamp_millis()) };
        if let Some(end) = end {
            range.insert("$lte", bson::DateTime::from_millis(end.timestamp_millis()));
        }

        let docs = self.table.find(doc! { "timestamp": range }).await?;
        debug!("DB events between {} and {:?}: {}", start, end, docs.len());

        Ok(docs.into_iter().map(EventRecord::from).collect())
    }
}

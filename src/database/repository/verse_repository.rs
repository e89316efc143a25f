//! Daily verse repository.

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use mongodb::bson::doc;
use tracing::debug;

use super::table::MongoTable;
use crate::database::models::VerseRecord;
use crate::database::store::{Record, RecordStore, VerseStore};
use crate::database::Database;

/// Repository for the `dailyBread` collection.
pub struct VerseRepository {
    table: MongoTable<VerseRecord>,
}

impl VerseRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db, VerseRecord::COLLECTION, VerseRecord::SORT_FIELD),
        }
    }
}

#[async_trait]
impl RecordStore<VerseRecord> for VerseRepository {
    async fn list(&self) -> Result<Vec<VerseRecord>> {
        self.table.find(doc! {}).await
    }

    async fn get(&self, id: &str) -> Result<Option<VerseRecord>> {
        self.table.get(id).await
    }

    async fn insert(&self, record: &VerseRecord) -> Result<()> {
        self.table.insert(record).await
    }

    async fn replace(&self, record: &VerseRecord) -> Result<bool> {
        self.table.replace(&record.id, record).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.table.delete(id).await
    }
}

#[async_trait]
impl VerseStore for VerseRepository {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<VerseRecord>> {
        // Dates are stored as `YYYY-MM-DD` strings
        let result = self.table.find_one(doc! { "date": date.to_string() }).await?;
        debug!("DB get daily verse for {}: {:?}", date, result.is_some());
        Ok(result)
    }
}

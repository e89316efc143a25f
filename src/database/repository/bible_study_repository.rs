//! Bible study repository.

use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::doc;

use super::table::MongoTable;
use crate::database::models::BibleStudy;
use crate::database::store::{BibleStudyStore, Record, RecordStore};
use crate::database::Database;

/// Repository for the `bibleStudies` collection.
pub struct BibleStudyRepository {
    table: MongoTable<BibleStudy>,
}

impl BibleStudyRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db, BibleStudy::COLLECTION, BibleStudy::SORT_FIELD),
        }
    }
}

#[async_trait]
impl RecordStore<BibleStudy> for BibleStudyRepository {
    async fn list(&self) -> Result<Vec<BibleStudy>> {
        self.table.find(doc! {}).await
    }

    async fn get(&self, id: &str) -> Result<Option<BibleStudy>> {
        self.table.get(id).await
    }

    async fn insert(&self, record: &BibleStudy) -> Result<()> {
        self.table.insert(record).await
    }

    async fn replace(&self, record: &BibleStudy) -> Result<bool> {
        self.table.replace(&record.id, record).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.table.delete(id).await
    }
}

impl BibleStudyStore for BibleStudyRepository {}

//! User repository.
//!
//! Lookups by token back the admin permission checks; the checker caches
//! the resulting role, so this repository stays uncached.

use anyhow::Result;
use async_trait::async_trait;
use mongodb::bson::doc;
use tracing::debug;

use super::table::MongoTable;
use crate::database::models::UserRecord;
use crate::database::store::{Record, RecordStore, UserStore};
use crate::database::Database;

/// Repository for the `users` collection.
pub struct UserRepository {
    table: MongoTable<UserRecord>,
}

impl UserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            table: MongoTable::new(db, UserRecord::COLLECTION, UserRecord::SORT_FIELD),
        }
    }
}

#[async_trait]
impl RecordStore<UserRecord> for UserRepository {
    async fn list(&self) -> Result<Vec<UserRecord>> {
        self.table.find(doc! {}).await
    }

    async fn get(&self, id: &str) -> Result<Option<UserRecord>> {
        self.table.get(id).await
    }

    async fn insert(&self, record: &UserRecord) -> Result<()> {
        self.table.insert(record).await
    }

    async fn replace(&self, record: &UserRecord) -> Result<bool> {
        self.table.replace(&record.id, record).await
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        self.table.delete(id).await
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_token(&self, token: &str) -> Result<Option<UserRecord>> {
        let result = self.table.find_one(doc! { "token": token }).await?;
        debug!("DB user lookup by token: {:?}", result.is_some());
        Ok(result)
    }
}

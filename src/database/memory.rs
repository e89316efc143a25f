//! In-memory store backend.
//!
//! Each collection is a `Vec` behind a lock. Used for development
//! (`STORE_BACKEND=memory`) and throughout the tests.

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::RwLock;

use super::models::{BibleStudy, EventRecord, UserRecord, VerseRecord};
use super::store::{BibleStudyStore, EventStore, Record, RecordStore, UserStore, VerseStore};

/// One in-memory collection.
pub struct MemoryTable<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Default for MemoryTable<T> {
    fn default() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

impl<T: Record> MemoryTable<T> {
    /// Table pre-filled with `rows` (insertion order kept).
    #[cfg(test)]
    pub fn with_rows(rows: Vec<T>) -> Self {
        Self {
            rows: RwLock::new(rows),
        }
    }

    fn find<F>(&self, predicate: F) -> Option<T>
    where
        F: Fn(&T) -> bool,
    {
        self.rows.read().iter().find(|r| predicate(*r)).cloned()
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for MemoryTable<T> {
    async fn list(&self) -> Result<Vec<T>> {
        let mut rows = self.rows.read().clone();
        T::sort(&mut rows);
        Ok(rows)
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.find(|r| r.id() == id))
    }

    async fn insert(&self, record: &T) -> Result<()> {
        let mut rows = self.rows.write();
        if rows.iter().any(|r| r.id() == record.id()) {
            bail!("duplicate id '{}' in {}", record.id(), T::COLLECTION);
        }
        rows.push(record.clone());
        Ok(())
    }

    async fn replace(&self, record: &T) -> Result<bool> {
        let mut rows = self.rows.write();
        match rows.iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        Ok(rows.len() < before)
    }
}

#[async_trait]
impl VerseStore for MemoryTable<VerseRecord> {
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<VerseRecord>> {
        Ok(self.find(|r| r.date == date))
    }
}

#[async_trait]
impl EventStore for MemoryTable<EventRecord> {
    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<EventRecord>> {
        let mut events: Vec<EventRecord> = self
            .rows
            .read()
            .iter()
            .filter(|e| e.timestamp >= start && end.is_none_or(|end| e.timestamp <= end))
            .cloned()
            .collect();
        EventRecord::sort(&mut events);
        Ok(events)
    }
}

impl BibleStudyStore for MemoryTable<BibleStudy> {}

#[async_trait]
impl UserStore for MemoryTable<UserRecord> {
    async fn find_by_token(&self, token: &str) -> Result<Option<UserRecord>> {
        Ok(self.find(|u| u.token == token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verse(id: &str, date: &str, verse: &str) -> VerseRecord {
        VerseRecord {
            id: id.to_string(),
            date: date.parse().unwrap(),
            verse: Some(verse.to_string()),
            content: None,
            content_zh: None,
        }
    }

    #[tokio::test]
    async fn test_crud() {
        let table = MemoryTable::<VerseRecord>::default();
        table.insert(&verse("b", "2024-01-02", "John 1:1")).await.unwrap();
        table.insert(&verse("a", "2024-01-01", "John 3:16")).await.unwrap();
        assert!(table.insert(&verse("a", "2024-01-05", "Jude 1:3")).await.is_err());

        let listed = table.list().await.unwrap();
        assert_eq!(listed[0].id, "a"); // sorted by date

        assert!(table.replace(&verse("a", "2024-01-01", "Psalms 23:1")).await.unwrap());
        assert!(!table.replace(&verse("zzz", "2024-01-01", "Psalms 23:1")).await.unwrap());
        assert_eq!(table.get("a").await.unwrap().unwrap().verse.as_deref(), Some("Psalms 23:1"));

        assert!(table.delete("b").await.unwrap());
        assert!(!table.delete("b").await.unwrap());
        assert_eq!(table.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_find_by_date_returns_first() {
        let table = MemoryTable::with_rows(vec![
            verse("1", "2024-01-01", "John 3:16"),
            verse("2", "2024-01-01", "Psalms 23:1"),
        ]);
        let found = table.find_by_date("2024-01-01".parse().unwrap()).await.unwrap().unwrap();
        assert_eq!(found.id, "1");
        assert!(table.find_by_date("2024-01-02".parse().unwrap()).await.unwrap().is_none());
    }
}

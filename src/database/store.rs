//! Store traits.
//!
//! Services and handlers depend on these traits rather than on MongoDB
//! directly, so the same code runs against the in-memory backend.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use super::models::{BibleStudy, EventRecord, UserRecord, VerseRecord};

/// A record addressable by its string ID.
pub trait Record: Clone + Send + Sync + Unpin + 'static {
    /// Collection name in the database.
    const COLLECTION: &'static str;

    /// Field lists are ordered by.
    const SORT_FIELD: &'static str;

    fn id(&self) -> &str;

    /// Order rows the same way `SORT_FIELD` orders them in the database.
    fn sort(rows: &mut [Self]);
}

impl Record for VerseRecord {
    const COLLECTION: &'static str = "dailyBread";
    const SORT_FIELD: &'static str = "date";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by_key(|r| r.date);
    }
}

impl Record for EventRecord {
    const COLLECTION: &'static str = "events";
    const SORT_FIELD: &'static str = "timestamp";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by_key(|r| r.timestamp);
    }
}

impl Record for BibleStudy {
    const COLLECTION: &'static str = "bibleStudies";
    const SORT_FIELD: &'static str = "date";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by_key(|r| r.details.date);
    }
}

impl Record for UserRecord {
    const COLLECTION: &'static str = "users";
    const SORT_FIELD: &'static str = "name";

    fn id(&self) -> &str {
        &self.id
    }

    fn sort(rows: &mut [Self]) {
        rows.sort_by(|a, b| a.name.cmp(&b.name));
    }
}

/// Basic CRUD over one collection.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// All records, ordered by `T::SORT_FIELD`.
    async fn list(&self) -> Result<Vec<T>>;

    async fn get(&self, id: &str) -> Result<Option<T>>;

    async fn insert(&self, record: &T) -> Result<()>;

    /// Replace the record with the same ID. Returns `false` if none exists.
    async fn replace(&self, record: &T) -> Result<bool>;

    /// Delete by ID. Returns `false` if none exists.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Daily verses.
#[async_trait]
pub trait VerseStore: RecordStore<VerseRecord> {
    /// First record stored for `date`, if any.
    async fn find_by_date(&self, date: NaiveDate) -> Result<Option<VerseRecord>>;
}

/// Church events.
#[async_trait]
pub trait EventStore: RecordStore<EventRecord> {
    /// Events with `start <= timestamp <= end` (no upper bound when `end` is
    /// `None`), ordered by timestamp ascending.
    async fn find_between(
        &self,
        start: DateTime<Utc>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<EventRecord>>;
}

/// Bible study sessions.
pub trait BibleStudyStore: RecordStore<BibleStudy> {}

/// Site users.
#[async_trait]
pub trait UserStore: RecordStore<UserRecord> {
    async fn find_by_token(&self, token: &str) -> Result<Option<UserRecord>>;
}

//! Database module exports.
//!
//! - `models` - Stored records and admin payloads
//! - `store` - Store traits used by services and handlers
//! - `repository` - MongoDB implementations
//! - `memory` - In-memory implementations

mod memory;
mod models;
mod mongo;
mod repository;
mod store;

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::{Config, StoreBackend};

pub use memory::MemoryTable;
pub use models::*;
pub use mongo::Database;
pub use repository::{BibleStudyRepository, EventRepository, UserRepository, VerseRepository};
pub use store::{BibleStudyStore, EventStore, RecordStore, UserStore, VerseStore};

/// One handle per collection, shared by services and handlers.
#[derive(Clone)]
pub struct Stores {
    pub verses: Arc<dyn VerseStore>,
    pub events: Arc<dyn EventStore>,
    pub bible_studies: Arc<dyn BibleStudyStore>,
    pub users: Arc<dyn UserStore>,
}

impl Stores {
    /// Open the backend selected in `config`.
    ///
    /// # Errors
    /// Returns error if MongoDB is selected and cannot be reached.
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        match (&config.store_backend, &config.mongodb_uri) {
            (StoreBackend::Mongodb, Some(uri)) => {
                info!("Connecting to MongoDB...");
                let db = Database::connect(uri, &config.mongodb_database).await?;
                db.ensure_indexes().await?;
                Ok(Self::mongo(&db))
            }
            (StoreBackend::Mongodb, None) => {
                anyhow::bail!("MONGODB_URI must be set when STORE_BACKEND is mongodb")
            }
            (StoreBackend::Memory, _) => {
                warn!("Using in-memory store, content is lost on restart");
                Ok(Self::memory())
            }
        }
    }

    /// Stores backed by MongoDB collections.
    pub fn mongo(db: &Database) -> Self {
        Self {
            verses: Arc::new(VerseRepository::new(db)),
            events: Arc::new(EventRepository::new(db)),
            bible_studies: Arc::new(BibleStudyRepository::new(db)),
            users: Arc::new(UserRepository::new(db)),
        }
    }

    /// Empty in-memory stores.
    pub fn memory() -> Self {
        Self {
            verses: Arc::new(MemoryTable::<VerseRecord>::default()),
            events: Arc::new(MemoryTable::<EventRecord>::default()),
            bible_studies: Arc::new(MemoryTable::<BibleStudy>::default()),
            users: Arc::new(MemoryTable::<UserRecord>::default()),
        }
    }
}

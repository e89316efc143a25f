//! Daily Bread resolution.
//!
//! Resolves a calendar date to the day's verse in both languages:
//!
//! - no record for the date: the default verse, fetched text or built-in text
//! - record with a reference: freshly fetched text, else the stored text
//! - record without a reference: the stored row, no fetch
//!
//! `verse_zh` is always derived from `verse`, never read from storage.

use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::bible::{Language, Verse, VerseContent, VerseSource, translate_reference};
use crate::database::{VerseRecord, VerseStore};
use crate::error::AppError;

/// Verse shown when no record exists for the requested day.
#[derive(Debug, Clone)]
pub struct DailyBreadDefaults {
    pub reference: String,
    /// English text used when the upstream cannot be reached.
    pub content: String,
    /// Chinese text used when the upstream cannot be reached.
    pub content_zh: String,
}

impl Default for DailyBreadDefaults {
    fn default() -> Self {
        Self {
            reference: "John 3:16".to_string(),
            content: "For God so loved the world...".to_string(),
            content_zh: "神爱世人...".to_string(),
        }
    }
}

/// Bilingual daily bread as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyBreadResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub date: NaiveDate,
    pub verse: Option<String>,
    pub verse_zh: Option<String>,
    pub content: Option<String>,
    pub content_zh: Option<String>,
    pub verses: Vec<Verse>,
    pub verses_zh: Vec<Verse>,
}

/// Resolves daily bread from the verse store and the upstream text API.
pub struct DailyBreadService {
    store: Arc<dyn VerseStore>,
    source: Arc<dyn VerseSource>,
    defaults: DailyBreadDefaults,
}

impl DailyBreadService {
    pub fn new(
        store: Arc<dyn VerseStore>,
        source: Arc<dyn VerseSource>,
        defaults: DailyBreadDefaults,
    ) -> Self {
        Self {
            store,
            source,
            defaults,
        }
    }

    /// Resolve the daily bread for `date`.
    ///
    /// # Errors
    /// `MissingParameter` when no date is given (the store is not touched),
    /// `Store` when the verse lookup fails. Upstream failures never error.
    pub async fn resolve(&self, date: Option<NaiveDate>) -> Result<DailyBreadResult, AppError> {
        let date = date.ok_or(AppError::MissingParameter("date"))?;

        let record = self
            .store
            .find_by_date(date)
            .await
            .with_context(|| format!("fetching daily bread for {}", date))?;

        let Some(record) = record else {
            info!("No daily bread stored for {}, using {}", date, self.defaults.reference);
            return Ok(self.resolve_default(date).await);
        };

        let reference = record
            .verse
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(String::from);

        match reference {
            Some(reference) => Ok(self.resolve_stored(record, reference).await),
            None => {
                debug!("Daily bread for {} has no verse reference", date);
                Ok(Self::as_stored(record))
            }
        }
    }

    /// Fetch English and Chinese text concurrently.
    async fn fetch_both(&self, reference: &str) -> (Option<VerseContent>, Option<VerseContent>) {
        tokio::join!(
            self.source.fetch(reference, Language::English),
            self.source.fetch(reference, Language::Chinese),
        )
    }

    async fn resolve_default(&self, date: NaiveDate) -> DailyBreadResult {
        let reference = &self.defaults.reference;
        let (en, zh) = self.fetch_both(reference).await;
        let (content, verses) = split(en);
        let (content_zh, verses_zh) = split(zh);

        DailyBreadResult {
            id: None,
            date,
            verse: Some(reference.clone()),
            verse_zh: Some(translate_reference(reference)),
            content: Some(content.unwrap_or_else(|| self.defaults.content.clone())),
            content_zh: Some(content_zh.unwrap_or_else(|| self.defaults.content_zh.clone())),
            verses,
            verses_zh,
        }
    }

    /// `reference` is the trimmed form of `record.verse`; the stored value is
    /// echoed unchanged.
    async fn resolve_stored(&self, record: VerseRecord, reference: String) -> DailyBreadResult {
        let (en, zh) = self.fetch_both(&reference).await;
        let (content, verses) = split(en);
        let (content_zh, verses_zh) = split(zh);

        DailyBreadResult {
            id: Some(record.id).filter(|id| !id.is_empty()),
            date: record.date,
            verse: record.verse,
            verse_zh: Some(translate_reference(&reference)),
            // fetched text wins; the stored text is an older copy
            content: content.or(record.content),
            content_zh: content_zh.or(record.content_zh),
            verses,
            verses_zh,
        }
    }

    fn as_stored(record: VerseRecord) -> DailyBreadResult {
        DailyBreadResult {
            id: Some(record.id).filter(|id| !id.is_empty()),
            date: record.date,
            verse: record.verse,
            verse_zh: None,
            content: record.content,
            content_zh: record.content_zh,
            verses: Vec::new(),
            verses_zh: Vec::new(),
        }
    }
}

/// Text (if non-empty) and verse list of a fetch result.
fn split(content: Option<VerseContent>) -> (Option<String>, Vec<Verse>) {
    match content {
        Some(c) => (Some(c.text).filter(|t| !t.trim().is_empty()), c.verses),
        None => (None, Vec::new()),
    }
}

//! Daily verse model (`dailyBread` collection).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The verse assigned to one calendar day.
///
/// `content`/`content_zh` hold text from an earlier upstream fetch and act as
/// a stale fallback when the upstream is unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseRecord {
    /// Record ID (assigned on create)
    #[serde(default)]
    pub id: String,

    /// Day the verse is shown on (stored as `YYYY-MM-DD`)
    pub date: NaiveDate,

    /// English reference, e.g. `John 3:16`
    #[serde(default)]
    pub verse: Option<String>,

    #[serde(default)]
    pub content: Option<String>,

    #[serde(default)]
    pub content_zh: Option<String>,
}

/// Admin payload for creating or replacing a verse.
#[derive(Debug, Clone, Deserialize)]
pub struct VerseInput {
    pub date: NaiveDate,
    #[serde(default)]
    pub verse: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_zh: Option<String>,
}

impl VerseRecord {
    /// Build a record from an admin payload.
    pub fn from_input(id: impl Into<String>, input: VerseInput) -> Self {
        Self {
            id: id.into(),
            date: input.date,
            verse: input.verse.filter(|v| !v.trim().is_empty()),
            content: input.content,
            content_zh: input.content_zh,
        }
    }
}

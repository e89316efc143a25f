//! Bible references and verse text.
//!
//! - `books` - English/Chinese book names and reference parsing
//! - `formatter` - Path encoding for the upstream text API
//! - `fetcher` - Upstream client (bible-api.com compatible)

pub mod books;
pub mod fetcher;
pub mod formatter;

use serde::{Deserialize, Serialize};

pub use books::translate_reference;
pub use fetcher::{BibleApiClient, VerseSource};
pub use formatter::format_for_upstream_query;

/// Language of a verse text request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "zh")]
    Chinese,
}

/// One verse as returned by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub book_id: String,
    pub book_name: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Normalized passage text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerseContent {
    /// Whole passage as one string.
    pub text: String,
    #[serde(default)]
    pub verses: Vec<Verse>,
    /// Canonical reference as echoed by the upstream.
    #[serde(default)]
    pub reference: String,
}

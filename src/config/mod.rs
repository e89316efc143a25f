//! Configuration module for the church site backend.
//!
//! Loads configuration from environment variables.

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use serde::Deserialize;
use url::Url;

/// Where content records are kept.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Mongodb,
    /// Process-local store, lost on restart. For development and demos.
    Memory,
}

/// Upstream Bible API settings.
#[derive(Debug, Clone)]
pub struct BibleApiConfig {
    pub base_url: Url,
    pub timeout_secs: u64,
    /// Translation parameter sent with Chinese requests.
    pub chinese_translation: String,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    // HTTP
    pub port: u16,
    /// Browser origin allowed by CORS. Any origin when unset.
    pub cors_allowed_origin: Option<String>,

    // Store
    pub store_backend: StoreBackend,
    pub mongodb_uri: Option<String>,
    pub mongodb_database: String,

    // Upstream
    pub bible_api: BibleApiConfig,

    /// Offset of the church's local time, used for whole-day event queries.
    pub site_offset: FixedOffset,

    /// Owner tokens (comma-separated).
    /// These tokens hold every admin capability without a user record.
    pub admin_tokens: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    /// Returns error if a variable is malformed or a required one is missing.
    pub fn from_env() -> Result<Self> {
        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "mongodb".to_string())
            .to_lowercase()
            .as_str()
        {
            "mongodb" | "mongo" => StoreBackend::Mongodb,
            "memory" => StoreBackend::Memory,
            other => bail!("STORE_BACKEND must be 'mongodb' or 'memory', got '{}'", other),
        };

        let mongodb_uri = env::var("MONGODB_URI").ok().filter(|s| !s.is_empty());

        // Validate URI is set if backend is mongodb
        if store_backend == StoreBackend::Mongodb && mongodb_uri.is_none() {
            bail!("MONGODB_URI must be set when STORE_BACKEND is mongodb");
        }

        let base_url = env::var("BIBLE_API_URL")
            .unwrap_or_else(|_| "https://bible-api.com".to_string());
        let base_url = Url::parse(&base_url)
            .with_context(|| format!("Invalid BIBLE_API_URL '{}'", base_url))?;

        let offset_minutes: i32 = parse_var("SITE_UTC_OFFSET_MINUTES", 0)?;
        let site_offset = FixedOffset::east_opt(offset_minutes * 60)
            .with_context(|| format!("SITE_UTC_OFFSET_MINUTES out of range: {}", offset_minutes))?;

        Ok(Self {
            port: parse_var("PORT", 3000)?,
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN").ok().filter(|s| !s.is_empty()),
            store_backend,
            mongodb_uri,
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "church".to_string()),
            bible_api: BibleApiConfig {
                base_url,
                timeout_secs: parse_var("BIBLE_API_TIMEOUT_SECS", 10)?,
                chinese_translation: env::var("BIBLE_API_CHINESE_TRANSLATION")
                    .unwrap_or_else(|_| "cuv".to_string()),
            },
            site_offset,
            admin_tokens: parse_list(&env::var("ADMIN_TOKENS").unwrap_or_default()),
        })
    }
}

/// Parse an optional variable, falling back to `default` when unset.
fn parse_var<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {} value '{}'", key, raw)),
        Err(_) => Ok(default),
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

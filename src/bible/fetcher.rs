//! Upstream verse-text client.
//!
//! Talks to a bible-api.com compatible service. Failures never reach the
//! caller: every error is logged and reported as "no content".

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{Language, VerseContent, format_for_upstream_query};
use crate::config::BibleApiConfig;

/// Source of verse text for a reference.
#[async_trait]
pub trait VerseSource: Send + Sync {
    /// Fetch the passage for `reference` in `language`.
    ///
    /// Returns `None` when the passage could not be retrieved.
    async fn fetch(&self, reference: &str, language: Language) -> Option<VerseContent>;
}

#[derive(Debug, Error)]
enum FetchError {
    #[error("base url {0} cannot take path segments")]
    BaseUrl(String),

    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("upstream returned {0}")]
    Status(StatusCode),

    #[error("unexpected response body: {0}")]
    Decode(#[source] reqwest::Error),
}

/// HTTP client for the upstream Bible API.
#[derive(Debug, Clone)]
pub struct BibleApiClient {
    client: Client,
    base_url: Url,
    chinese_translation: String,
}

impl BibleApiClient {
    /// Build a client from configuration.
    pub fn new(config: &BibleApiConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            chinese_translation: config.chinese_translation.clone(),
        })
    }

    /// URL for a reference: the formatted reference becomes a single path
    /// segment; Chinese requests select the configured translation.
    fn request_url(&self, reference: &str, language: Language) -> Result<Url, FetchError> {
        let query = format_for_upstream_query(reference, language);

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push(&query);

        if language == Language::Chinese {
            url.query_pairs_mut()
                .append_pair("translation", &self.chinese_translation);
        }

        Ok(url)
    }

    async fn try_fetch(&self, reference: &str, language: Language) -> Result<VerseContent, FetchError> {
        let url = self.request_url(reference, language)?;
        debug!("Fetching {} ({:?}) from {}", reference, language, url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        response.json::<VerseContent>().await.map_err(FetchError::Decode)
    }
}

#[async_trait]
impl VerseSource for BibleApiClient {
    async fn fetch(&self, reference: &str, language: Language) -> Option<VerseContent> {
        match self.try_fetch(reference, language).await {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Verse fetch for {} ({:?}) failed: {}", reference, language, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> BibleApiClient {
        BibleApiClient::new(&BibleApiConfig {
            base_url: Url::parse(base).unwrap(),
            timeout_secs: 5,
            chinese_translation: "cuv".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_english_url() {
        let url = client("https://bible-api.com").request_url("John 3:16", Language::English).unwrap();
        assert_eq!(url.as_str(), "https://bible-api.com/John-3:16");
    }

    #[test]
    fn test_single_chapter_url_keeps_plus() {
        let url = client("https://bible-api.com/").request_url("Jude 1:3", Language::English).unwrap();
        assert_eq!(url.as_str(), "https://bible-api.com/jude+3");
    }

    #[test]
    fn test_chinese_url() {
        let url = client("https://bible-api.com").request_url("John 3:16", Language::Chinese).unwrap();
        // 約 = E7 B4 84
        assert!(url.path().starts_with("/%E7%B4%84"));
        assert!(url.path().ends_with("-3:16"));
        assert_eq!(url.query(), Some("translation=cuv"));
    }

    #[test]
    fn test_base_path_is_kept() {
        let url = client("http://localhost:8080/bible/").request_url("Psalms 23:1", Language::English).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/bible/Psalms-23:1");
    }

    #[test]
    fn test_decode_upstream_body() {
        let body = r#"{
            "reference": "John 3:16",
            "verses": [{"book_id": "JHN", "book_name": "John", "chapter": 3, "verse": 16, "text": "For God so loved the world"}],
            "text": "For God so loved the world",
            "translation_id": "web"
        }"#;
        let content: VerseContent = serde_json::from_str(body).unwrap();
        assert_eq!(content.reference, "John 3:16");
        assert_eq!(content.verses.len(), 1);
        assert_eq!(content.verses[0].book_id, "JHN");
    }

    /// Local upstream answering every request with `status` and `body`.
    async fn upstream(status: axum::http::StatusCode, body: &'static str) -> String {
        let app = axum::Router::new().fallback(move || async move { (status, body) });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{address}")
    }

    #[tokio::test]
    async fn test_error_status_yields_none() {
        let base = upstream(axum::http::StatusCode::NOT_FOUND, r#"{"error":"not found"}"#).await;
        assert!(client(&base).fetch("John 3:16", Language::English).await.is_none());
    }

    #[tokio::test]
    async fn test_undecodable_body_yields_none() {
        let base = upstream(axum::http::StatusCode::OK, "<html>maintenance</html>").await;
        assert!(client(&base).fetch("John 3:16", Language::Chinese).await.is_none());
    }

    #[tokio::test]
    async fn test_ok_body_is_decoded() {
        let body = r#"{"reference":"Jude 1:3","verses":[{"book_id":"JUD","book_name":"Jude","chapter":1,"verse":3,"text":"Beloved"}],"text":"Beloved"}"#;
        let base = upstream(axum::http::StatusCode::OK, body).await;

        let content = client(&base).fetch("Jude 1:3", Language::English).await.unwrap();
        assert_eq!(content.text, "Beloved");
        assert_eq!(content.reference, "Jude 1:3");
        assert_eq!(content.verses[0].verse, 3);
    }

    #[tokio::test]
    async fn test_unreachable_upstream_yields_none() {
        // port 9 (discard) on localhost is not expected to serve HTTP
        let source = client("http://127.0.0.1:9");
        assert!(source.fetch("John 3:16", Language::English).await.is_none());
    }
}

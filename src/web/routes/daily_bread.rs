//! `GET /api/daily-bread?date=YYYY-MM-DD`

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::info;

use crate::error::AppError;
use crate::services::DailyBreadResult;
use crate::utils::dates::{parse_date, present};
use crate::web::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct DailyBreadParams {
    pub date: Option<String>,
}

pub async fn get_daily_bread(
    State(state): State<AppState>,
    Query(params): Query<DailyBreadParams>,
) -> Result<Json<DailyBreadResult>, AppError> {
    info!("Requested date: {:?}", params.date);

    let date = present(params.date.as_deref())
        .map(|raw| parse_date("date", raw))
        .transpose()?;

    let result = state.daily_bread.resolve(date).await?;
    Ok(Json(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    use crate::database::VerseRecord;
    use crate::web::test_support::{json, state};

    fn params(date: Option<&str>) -> Query<DailyBreadParams> {
        Query(DailyBreadParams {
            date: date.map(String::from),
        })
    }

    #[tokio::test]
    async fn test_missing_date_is_400() {
        let (status, body) = json(get_daily_bread(State(state()), params(None)).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("date"));
    }

    #[tokio::test]
    async fn test_malformed_date_is_400() {
        let (status, body) = json(get_daily_bread(State(state()), params(Some("tomorrow"))).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("error").is_some());
    }

    #[tokio::test]
    async fn test_default_verse_when_nothing_stored() {
        let (status, body) =
            json(get_daily_bread(State(state()), params(Some("2025-03-15"))).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["verse"], "John 3:16");
        assert_eq!(body["verse_zh"], "約翰福音 3:16");
        assert_eq!(body["date"], "2025-03-15");
        assert!(!body["content"].as_str().unwrap().is_empty());
        assert!(!body["content_zh"].as_str().unwrap().is_empty());
        assert_eq!(body["verses"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_stored_content_survives_upstream_outage() {
        let state = state();
        state
            .stores
            .verses
            .insert(&VerseRecord {
                id: "v1".to_string(),
                date: "2024-01-01".parse().unwrap(),
                verse: Some("Psalms 23:1".to_string()),
                content: Some("The Lord is my shepherd; I shall not want.".to_string()),
                content_zh: None,
            })
            .await
            .unwrap();

        let (status, body) = json(get_daily_bread(State(state), params(Some("2024-01-01"))).await).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "The Lord is my shepherd; I shall not want.");
        assert_eq!(body["verse_zh"], "詩篇 23:1");
        assert_eq!(body["id"], "v1");
    }
}

//! Bible study sessions.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use tracing::info;

use super::{authorize, decode, new_id};
use crate::database::{BibleStudy, BibleStudyInput};
use crate::error::AppError;
use crate::permissions::Capability;
use crate::web::AppState;

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<BibleStudy>>, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    Ok(Json(state.stores.bible_studies.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<BibleStudy>), AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    let input: BibleStudyInput = decode(&body)?;
    input.validate()?;

    let study = BibleStudy::new(new_id(), input);
    state.stores.bible_studies.insert(&study).await?;
    info!("Created bible study {} on {}", study.id, study.details.date);

    Ok((StatusCode::CREATED, Json(study)))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<BibleStudy>, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    let input: BibleStudyInput = decode(&body)?;
    input.validate()?;

    let study = BibleStudy::new(id, input);
    if !state.stores.bible_studies.replace(&study).await? {
        return Err(AppError::NotFound("bible study"));
    }
    info!("Updated bible study {}", study.id);

    Ok(Json(study))
}

pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;

    if !state.stores.bible_studies.delete(&id).await? {
        return Err(AppError::NotFound("bible study"));
    }
    info!("Deleted bible study {}", id);

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    use crate::database::{Role, UserRecord};
    use crate::web::routes::admin::test_support::{auth, body};
    use crate::web::test_support::{OWNER, json, state};

    fn input(title: &str, date: &str) -> Bytes {
        body(json!({
            "title": title,
            "title_cn": "",
            "description": "",
            "description_cn": "",
            "passage": "Romans 8",
            "passage_cn": "羅馬書 8",
            "date": date,
            "time": "19:30",
            "location": "Fellowship hall",
            "location_cn": "",
        }))
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_date() {
        let state = state();
        for (title, date) in [("Later", "2025-04-02"), ("Sooner", "2025-03-05")] {
            let (status, _) =
                json(create(State(state.clone()), auth(OWNER), input(title, date)).await).await;
            assert_eq!(status, StatusCode::CREATED);
        }

        let (status, body) = json(list(State(state), auth(OWNER)).await).await;
        assert_eq!(status, StatusCode::OK);
        let studies = body.as_array().unwrap();
        assert_eq!(studies[0]["title"], "Sooner");
        assert_eq!(studies[1]["title"], "Later");
        assert_eq!(studies[0]["passage_cn"], "羅馬書 8");
    }

    #[tokio::test]
    async fn test_member_is_forbidden() {
        let state = state();
        state
            .stores
            .users
            .insert(&UserRecord {
                id: "u1".to_string(),
                name: "Member".to_string(),
                email: "member@example.org".to_string(),
                role: Role::Member,
                token: "member-token".to_string(),
            })
            .await
            .unwrap();

        let (status, body) = json(list(State(state), auth("member-token")).await).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].as_str().unwrap().contains("manage content"));
    }
}

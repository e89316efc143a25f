//! Daily bread verse records.
//!
//! At most one record per date: the public endpoint serves the first match,
//! so a second record for a taken date is rejected.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use chrono::NaiveDate;
use tracing::info;

use super::{authorize, decode, new_id};
use crate::database::{VerseInput, VerseRecord};
use crate::error::AppError;
use crate::permissions::Capability;
use crate::web::AppState;

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<VerseRecord>>, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    Ok(Json(state.stores.verses.list().await?))
}

/// Reject `date` when a record other than `id` already holds it.
async fn ensure_date_free(state: &AppState, date: NaiveDate, id: Option<&str>) -> Result<(), AppError> {
    match state.stores.verses.find_by_date(date).await? {
        Some(existing) if Some(existing.id.as_str()) != id => Err(AppError::Validation(format!(
            "a verse is already scheduled for {}",
            date
        ))),
        _ => Ok(()),
    }
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<VerseRecord>), AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    let input: VerseInput = decode(&body)?;
    ensure_date_free(&state, input.date, None).await?;

    let record = VerseRecord::from_input(new_id(), input);
    state.stores.verses.insert(&record).await?;
    info!("Created daily bread {} for {}", record.id, record.date);

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<VerseRecord>, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    let input: VerseInput = decode(&body)?;
    ensure_date_free(&state, input.date, Some(&id)).await?;

    let record = VerseRecord::from_input(id, input);
    if !state.stores.verses.replace(&record).await? {
        return Err(AppError::NotFound("verse"));
    }
    info!("Updated daily bread {}", record.id);

    Ok(Json(record))
}

pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;

    if !state.stores.verses.delete(&id).await? {
        return Err(AppError::NotFound("verse"));
    }
    info!("Deleted daily bread {}", id);

    Ok(StatusCode::NO_CONTENT)
}

//! Calendar events.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use tracing::info;

use super::{authorize, decode, new_id};
use crate::database::{EventInput, EventRecord};
use crate::error::AppError;
use crate::permissions::Capability;
use crate::web::AppState;

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<EventRecord>>, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    Ok(Json(state.stores.events.list().await?))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<EventRecord>), AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    let input: EventInput = decode(&body)?;
    input.validate()?;

    let record = EventRecord::from_input(new_id(), input);
    state.stores.events.insert(&record).await?;
    info!("Created event {} at {}", record.id, record.timestamp);

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<EventRecord>, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;
    let input: EventInput = decode(&body)?;
    input.validate()?;

    let record = EventRecord::from_input(id, input);
    if !state.stores.events.replace(&record).await? {
        return Err(AppError::NotFound("event"));
    }
    info!("Updated event {}", record.id);

    Ok(Json(record))
}

pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&state, &headers, Capability::ManageContent).await?;

    if !state.stores.events.delete(&id).await? {
        return Err(AppError::NotFound("event"));
    }
    info!("Deleted event {}", id);

    Ok(StatusCode::NO_CONTENT)
}

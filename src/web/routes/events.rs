//! `GET /api/events?day=…` or `?start=…[&end=…]`

use axum::Json;
use axum::extract::{Query, State};

use crate::database::EventRecord;
use crate::error::AppError;
use crate::services::EventQuery;
use crate::web::AppState;

pub async fn list_events(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Vec<EventRecord>>, AppError> {
    let events = state.events.query(&query).await?;
    Ok(Json(events))
}

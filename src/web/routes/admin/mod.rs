//! Admin API under `/api/admin`.
//!
//! Every route takes `Authorization: Bearer <token>`. Verses, events and
//! bible studies need [`Capability::ManageContent`]; users need
//! [`Capability::ManageUsers`]. Request bodies are decoded only after the
//! token is accepted.

pub mod bible_studies;
pub mod events;
pub mod users;
pub mod verses;

use axum::Router;
use axum::body::Bytes;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::routing::{get, put};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::AppError;
use crate::permissions::Capability;
use crate::web::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/verses", get(verses::list).post(verses::create))
        .route("/verses/:id", put(verses::update).delete(verses::remove))
        .route("/events", get(events::list).post(events::create))
        .route("/events/:id", put(events::update).delete(events::remove))
        .route("/bible-studies", get(bible_studies::list).post(bible_studies::create))
        .route(
            "/bible-studies/:id",
            put(bible_studies::update).delete(bible_studies::remove),
        )
        .route("/users", get(users::list).post(users::create))
        .route("/users/:id", put(users::update).delete(users::remove))
}

/// Token from an `Authorization: Bearer …` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

pub(crate) async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    capability: Capability,
) -> Result<(), AppError> {
    state
        .permissions
        .require(bearer_token(headers), capability)
        .await
}

/// Decode a JSON request body.
pub(crate) fn decode<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("invalid request body: {}", e)))
}

pub(crate) fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::body::Bytes;
    use axum::http::HeaderMap;
    use axum::http::header::AUTHORIZATION;

    pub fn body(value: serde_json::Value) -> Bytes {
        Bytes::from(value.to_string())
    }

    pub fn auth(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, format!("Bearer {token}").parse().unwrap());
        headers
    }
}

//! Admin users and their roles.
//!
//! Tokens are minted on creation and returned only then. Updates keep the
//! token; every change drops the cached role for it.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use tracing::info;
use uuid::Uuid;

use super::{authorize, decode, new_id};
use crate::database::{CreatedUser, UserInput, UserRecord, UserView};
use crate::error::AppError;
use crate::permissions::Capability;
use crate::web::AppState;

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<UserView>>, AppError> {
    authorize(&state, &headers, Capability::ManageUsers).await?;

    let users = state.stores.users.list().await?;
    Ok(Json(users.iter().map(UserView::from).collect()))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedUser>), AppError> {
    authorize(&state, &headers, Capability::ManageUsers).await?;
    let input: UserInput = decode(&body)?;
    input.validate()?;

    let token = Uuid::new_v4().simple().to_string();
    let user = UserRecord::from_input(new_id(), token, input);
    state.stores.users.insert(&user).await?;
    info!("Created user {} with role {:?}", user.id, user.role);

    Ok((
        StatusCode::CREATED,
        Json(CreatedUser {
            user: UserView::from(&user),
            token: user.token,
        }),
    ))
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<UserView>, AppError> {
    authorize(&state, &headers, Capability::ManageUsers).await?;
    let input: UserInput = decode(&body)?;
    input.validate()?;

    let existing = state
        .stores
        .users
        .get(&id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    let user = UserRecord::from_input(id, existing.token, input);
    if !state.stores.users.replace(&user).await? {
        return Err(AppError::NotFound("user"));
    }
    state.permissions.invalidate(&user.token);
    info!("Updated user {} with role {:?}", user.id, user.role);

    Ok(Json(UserView::from(&user)))
}

pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    authorize(&state, &headers, Capability::ManageUsers).await?;

    let existing = state
        .stores
        .users
        .get(&id)
        .await?
        .ok_or(AppError::NotFound("user"))?;

    if !state.stores.users.delete(&id).await? {
        return Err(AppError::NotFound("user"));
    }
    state.permissions.invalidate(&existing.token);
    info!("Deleted user {}", id);

    Ok(StatusCode::NO_CONTENT)
}

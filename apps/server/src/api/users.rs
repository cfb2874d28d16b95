//! User API endpoints.
//!
//! Request bodies are decoded from raw bytes so that a missing or unexpected
//! `Content-Type` header does not change how the body is interpreted.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{StatusCode, Uri},
};
use entities::{NewUser, User, UserId, UserPatch};
use serde::de::DeserializeOwned;
use user_store::UserStoreError;

use crate::error::{ServerError, ServerResult};
use crate::state::AppState;

fn parse_user_id(raw: &str) -> ServerResult<UserId> {
    raw.parse().map_err(|_| ServerError::invalid_user_id())
}

fn decode_body<T: DeserializeOwned>(body: &[u8]) -> ServerResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Failed to decode request body");
        ServerError::invalid_body()
    })
}

/// PATCH and DELETE report a missing record as a bad request, unlike GET.
fn absent_as_bad_request(err: UserStoreError) -> ServerError {
    match err {
        UserStoreError::NotFound { .. } => {
            ServerError::InvalidRequest("User not found".to_string())
        }
    }
}

/// Lists all users.
pub async fn list_users(State(state): State<AppState>) -> ServerResult<Json<Vec<User>>> {
    let users = state.store.list_users().await?;
    Ok(Json(users))
}

/// Creates a user under a server-assigned id.
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ServerResult<(StatusCode, Json<User>)> {
    let new_user: NewUser = decode_body(&body)?;
    let user = state.store.create_user(new_user).await?;

    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// Gets a user by id.
pub async fn get_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ServerResult<Json<User>> {
    let id = parse_user_id(&raw_id)?;

    let user = state
        .store
        .get_user(id)
        .await?
        .ok_or_else(|| ServerError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}

/// Applies a partial update to an existing user.
pub async fn patch_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ServerResult<StatusCode> {
    let id = parse_user_id(&raw_id)?;
    let patch: UserPatch = decode_body(&body)?;

    state
        .store
        .patch_user(id, patch)
        .await
        .map_err(absent_as_bad_request)?;

    tracing::info!(user_id = id, "User patched");

    Ok(StatusCode::NO_CONTENT)
}

/// Creates or overwrites the user stored under the path id.
pub async fn replace_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> ServerResult<StatusCode> {
    let id = parse_user_id(&raw_id)?;
    let new_user: NewUser = decode_body(&body)?;

    state.store.replace_user(id, new_user).await?;

    tracing::info!(user_id = id, "User replaced");

    Ok(StatusCode::NO_CONTENT)
}

/// Deletes a user.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> ServerResult<StatusCode> {
    let id = parse_user_id(&raw_id)?;

    state
        .store
        .delete_user(id)
        .await
        .map_err(absent_as_bad_request)?;

    tracing::info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for unsupported methods on `/users`. HEAD is routed here too so
/// that it is not answered by the GET handler.
pub async fn collection_method_not_allowed() -> ServerError {
    ServerError::MethodNotAllowed
}

/// Fallback for unsupported methods on `/users/{id}`. The id is still
/// validated first.
pub async fn record_method_not_allowed(Path(raw_id): Path<String>) -> ServerError {
    match parse_user_id(&raw_id) {
        Ok(_) => ServerError::MethodNotAllowed,
        Err(err) => err,
    }
}

/// Paths matching no route. Anything under `/users/` is an id that failed
/// to parse (empty, or spanning several segments).
pub async fn unmatched_path(uri: Uri) -> ServerError {
    if uri.path().starts_with("/users/") {
        ServerError::invalid_user_id()
    } else {
        ServerError::NotFound("404 page not found".to_string())
    }
}

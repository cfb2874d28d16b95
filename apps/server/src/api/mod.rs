//! API endpoints.

pub mod users;

use axum::{Router, extract::State, routing::get};

use crate::error::ServerResult;
use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router() -> Router<AppState> {
    Router::new()
        // Collection endpoints
        .route(
            "/users",
            get(users::list_users)
                .head(users::collection_method_not_allowed)
                .post(users::create_user)
                .fallback(users::collection_method_not_allowed),
        )
        // Single record endpoints
        .route(
            "/users/{id}",
            get(users::get_user)
                .head(users::record_method_not_allowed)
                .patch(users::patch_user)
                .put(users::replace_user)
                .delete(users::delete_user)
                .fallback(users::record_method_not_allowed),
        )
        // Health check
        .route("/health", get(health_check))
        .fallback(users::unmatched_path)
}

/// Health check endpoint.
async fn health_check(State(state): State<AppState>) -> ServerResult<&'static str> {
    let count = state.store.count_users().await?;
    tracing::trace!(users = count, "Health check");
    Ok("OK")
}

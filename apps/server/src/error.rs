//! Server error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use user_store::UserStoreError;

/// Server error type.
///
/// Rendered as a plain-text body holding the message followed by a newline.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Malformed request (bad id segment, bad body, or a missing record on
    /// routes that report absence as a bad request).
    #[error("{0}")]
    InvalidRequest(String),

    /// Resource not found.
    #[error("{0}")]
    NotFound(String),

    /// Method not supported on the path.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Store error that was not mapped by the handler.
    #[error("Store error: {0}")]
    Store(#[from] UserStoreError),
}

impl ServerError {
    pub fn invalid_user_id() -> Self {
        Self::InvalidRequest("Invalid user id".to_string())
    }

    pub fn invalid_body() -> Self {
        Self::InvalidRequest("Invalid request body".to_string())
    }

    /// Status code reported to the client.
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, "Request rejected");
        }

        (status, format!("{self}\n")).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

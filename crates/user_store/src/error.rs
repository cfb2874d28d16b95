//! User store error types.

use entities::UserId;
use thiserror::Error;

/// Errors that can occur during user store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserStoreError {
    /// No record exists under the id.
    #[error("User not found: {id}")]
    NotFound { id: UserId },
}

impl UserStoreError {
    /// Creates a not found error.
    pub fn not_found(id: UserId) -> Self {
        Self::NotFound { id }
    }
}

/// Result type for user store operations.
pub type UserStoreResult<T> = Result<T, UserStoreError>;

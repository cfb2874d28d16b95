//! User store trait definitions.

use async_trait::async_trait;
use entities::{NewUser, User, UserId, UserPatch};

use crate::UserStoreResult;

/// Trait for user storage operations.
///
/// Every operation is atomic with respect to every other one: implementations
/// must never expose a partially applied change.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns a snapshot of all users.
    async fn list_users(&self) -> UserStoreResult<Vec<User>>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> UserStoreResult<Option<User>>;

    /// Creates a user under the next free ID.
    async fn create_user(&self, new_user: NewUser) -> UserStoreResult<User>;

    /// Inserts or overwrites the user stored under `id`.
    async fn replace_user(&self, id: UserId, new_user: NewUser) -> UserStoreResult<User>;

    /// Applies a partial update. Fails if the user does not exist.
    async fn patch_user(&self, id: UserId, patch: UserPatch) -> UserStoreResult<User>;

    /// Deletes a user. Fails if the user does not exist.
    async fn delete_user(&self, id: UserId) -> UserStoreResult<()>;

    /// Returns the number of stored users.
    async fn count_users(&self) -> UserStoreResult<usize>;
}

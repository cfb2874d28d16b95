//! In-memory user store implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use entities::{NewUser, User, UserId, UserPatch};
use tokio::sync::RwLock;

use crate::{UserStore, UserStoreError, UserStoreResult};

/// Records and the ID counter, guarded together so that ID assignment and
/// insertion happen in one critical section.
#[derive(Debug)]
struct Records {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

impl Default for Records {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Volatile user store. Contents are lost when the store is dropped.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    records: RwLock<Records>,
}

impl MemoryUserStore {
    /// Creates a new, empty in-memory user store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn list_users(&self) -> UserStoreResult<Vec<User>> {
        let records = self.records.read().await;
        Ok(records.users.values().cloned().collect())
    }

    async fn get_user(&self, id: UserId) -> UserStoreResult<Option<User>> {
        let records = self.records.read().await;
        Ok(records.users.get(&id).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> UserStoreResult<User> {
        let mut records = self.records.write().await;
        let id = records.next_id;
        records.next_id += 1;

        let user = User::from_new(id, new_user);
        records.users.insert(id, user.clone());
        tracing::debug!(user_id = id, "User created");
        Ok(user)
    }

    async fn replace_user(&self, id: UserId, new_user: NewUser) -> UserStoreResult<User> {
        let mut records = self.records.write().await;
        let user = User::from_new(id, new_user);
        let replaced = records.users.insert(id, user.clone()).is_some();
        tracing::debug!(user_id = id, replaced, "User replaced");
        Ok(user)
    }

    async fn patch_user(&self, id: UserId, patch: UserPatch) -> UserStoreResult<User> {
        let mut records = self.records.write().await;
        let user = records
            .users
            .get_mut(&id)
            .ok_or_else(|| UserStoreError::not_found(id))?;

        patch.apply(user);
        tracing::debug!(user_id = id, "User patched");
        Ok(user.clone())
    }

    async fn delete_user(&self, id: UserId) -> UserStoreResult<()> {
        let mut records = self.records.write().await;
        if records.users.remove(&id).is_none() {
            return Err(UserStoreError::not_found(id));
        }
        tracing::debug!(user_id = id, "User deleted");
        Ok(())
    }

    async fn count_users(&self) -> UserStoreResult<usize> {
        let records = self.records.read().await;
        Ok(records.users.len())
    }
}

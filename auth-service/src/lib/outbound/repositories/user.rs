use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use auth::NewUser;
use auth::StoredUser;
use auth::UserId;
use auth::UserStore;
use auth::UserStoreError;
use chrono::Utc;
use tokio::sync::RwLock;

/// Process-local user store keyed by username.
///
/// Stands in for a real database; contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<String, StoredUser>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, UserStoreError> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, user: NewUser) -> Result<StoredUser, UserStoreError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.username) {
            return Err(UserStoreError::UsernameAlreadyExists(user.username));
        }

        let stored = StoredUser {
            id: UserId::new(),
            username: user.username,
            password_hash: user.password_hash,
            profile: user.profile,
            created_at: Utc::now(),
        };
        users.insert(stored.username.clone(), stored.clone());

        tracing::debug!(user_id = %stored.id, "User stored");

        Ok(stored)
    }
}

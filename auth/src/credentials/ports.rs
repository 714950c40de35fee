use async_trait::async_trait;
use thiserror::Error;

use super::models::NewUser;
use super::models::StoredUser;

/// Error reported by a user store implementation.
#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("User store unavailable: {0}")]
    Unavailable(String),
}

/// Persistence operations the authentication core relies on.
///
/// Storage mechanics belong to the implementor; the core only looks users up
/// and hands over freshly hashed records.
#[async_trait]
pub trait UserStore: Send + Sync + 'static {
    /// Retrieve user by exact username.
    ///
    /// # Returns
    /// Optional user (None if not found)
    ///
    /// # Errors
    /// * `Unavailable` - Backing store failed
    async fn find_by_username(&self, username: &str) -> Result<Option<StoredUser>, UserStoreError>;

    /// Persist a new user.
    ///
    /// # Returns
    /// Stored user with its assigned identifier
    ///
    /// # Errors
    /// * `UsernameAlreadyExists` - Username is already taken
    /// * `Unavailable` - Backing store failed
    async fn create(&self, user: NewUser) -> Result<StoredUser, UserStoreError>;
}

use thiserror::Error;

use super::ports::UserStoreError;
use crate::password::PasswordError;

/// Failure of a credential check.
///
/// `InvalidCredentials` covers both an unknown username and a wrong password
/// so callers cannot tell the two apart.
#[derive(Debug, Clone, Error)]
pub enum AuthenticationError {
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("credential check timed out")]
    TimedOut,

    #[error("User store error: {0}")]
    Store(#[from] UserStoreError),

    #[error("Password error: {0}")]
    Hashing(#[from] PasswordError),
}

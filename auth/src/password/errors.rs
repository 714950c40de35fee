use thiserror::Error;

/// Error type for password hashing operations.
///
/// Verification never produces one of these: a mismatch or an unreadable
/// hash record is simply `false`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password hashing worker unavailable: {0}")]
    WorkerUnavailable(String),
}

use thiserror::Error;

/// Error type for token issuing and verification.
///
/// Messages are deliberately generic; the underlying library error is only
/// ever logged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token is missing")]
    Missing,

    #[error("Token is invalid")]
    Invalid,

    #[error("Token is expired")]
    Expired,

    #[error("Cannot issue a token for an empty identity")]
    InvalidClaim,

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),
}

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::identity::IdentityClaim;

/// JWT payload.
///
/// The identity claim plus registered timestamps and a random token ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject (identity claim subject ID)
    pub sub: String,

    pub username: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// JWT ID, keeps two tokens for the same claim and second distinct
    pub jti: String,
}

impl TokenClaims {
    /// Build the payload for `claim`, valid from `issued_at` for `lifetime`.
    pub fn issue(claim: &IdentityClaim, issued_at: DateTime<Utc>, lifetime: Duration) -> Self {
        let expiration = issued_at + lifetime;

        Self {
            sub: claim.subject_id.clone(),
            username: claim.username.clone(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Check if token is expired.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }

    /// Drop the timestamps and token ID, keeping only the identity.
    pub fn into_identity(self) -> IdentityClaim {
        IdentityClaim {
            subject_id: self.sub,
            username: self.username,
        }
    }
}

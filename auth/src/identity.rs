use serde::Deserialize;
use serde::Serialize;

use crate::credentials::StoredUser;

/// Minimal identity carried inside a token.
///
/// Never holds the password hash or profile data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    /// Stable identifier of the authenticated principal
    pub subject_id: String,
    pub username: String,
}

impl IdentityClaim {
    pub fn new(subject_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            username: username.into(),
        }
    }

    /// A claim without a subject cannot be issued.
    pub fn is_empty(&self) -> bool {
        self.subject_id.trim().is_empty()
    }
}

/// Reduce a stored user to the claim embedded in its tokens.
///
/// The username doubles as subject identifier.
pub fn project(user: &StoredUser) -> IdentityClaim {
    IdentityClaim {
        subject_id: user.username.clone(),
        username: user.username.clone(),
    }
}

impl From<&StoredUser> for IdentityClaim {
    fn from(user: &StoredUser) -> Self {
        project(user)
    }
}

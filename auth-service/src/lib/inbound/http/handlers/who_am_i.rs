use auth::IdentityClaim;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;

/// Echo the identity the authentication middleware recovered from the token.
pub async fn who_am_i(
    Extension(identity): Extension<IdentityClaim>,
) -> Result<ApiSuccess<WhoAmIResponseData>, ApiError> {
    Ok(ApiSuccess::new(StatusCode::OK, (&identity).into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhoAmIResponseData {
    pub subject_id: String,
    pub username: String,
}

impl From<&IdentityClaim> for WhoAmIResponseData {
    fn from(identity: &IdentityClaim) -> Self {
        Self {
            subject_id: identity.subject_id.clone(),
            username: identity.username.clone(),
        }
    }
}

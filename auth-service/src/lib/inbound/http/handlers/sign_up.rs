use auth::Gender;
use auth::StoredUser;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::account::errors::SignUpError;
use crate::account::models::SignUpCommand;
use crate::inbound::http::router::AppState;

pub async fn sign_up(
    State(state): State<AppState>,
    Json(body): Json<SignUpRequest>,
) -> Result<ApiSuccess<SignUpResponseData>, ApiError> {
    let (credentials, profile) = body.try_into_command()?.into_parts();

    state
        .authenticator
        .sign_up(credentials, profile)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for signing up (raw JSON)
#[derive(Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpRequest {
    username: String,
    password: String,
    first_name: String,
    last_name: String,
    gender: Gender,
    birthdate: NaiveDate,
    #[serde(default)]
    email: Option<String>,
}

impl SignUpRequest {
    fn try_into_command(self) -> Result<SignUpCommand, SignUpError> {
        SignUpCommand::new(
            self.username,
            self.password,
            self.first_name,
            self.last_name,
            self.gender,
            self.birthdate,
            self.email,
        )
    }
}

impl From<SignUpError> for ApiError {
    fn from(err: SignUpError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignUpResponseData {
    pub id: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthdate: NaiveDate,
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&StoredUser> for SignUpResponseData {
    fn from(user: &StoredUser) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username.clone(),
            first_name: user.profile.first_name.clone(),
            last_name: user.profile.last_name.clone(),
            gender: user.profile.gender,
            birthdate: user.profile.birthdate,
            email: user.profile.email.clone(),
            created_at: user.created_at,
        }
    }
}

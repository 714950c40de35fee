use auth::AuthError;
use auth::AuthenticationError;
use auth::TokenError;
use auth::UserStoreError;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

pub mod login;
pub mod sign_up;
pub mod who_am_i;

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid username or password.";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Conflict(String),
    Unauthorized(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match &err {
            TokenError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            TokenError::Missing | TokenError::Invalid => {
                ApiError::Unauthorized("Invalid token".to_string())
            }
            TokenError::InvalidClaim | TokenError::EncodingFailed(_) => {
                tracing::error!(error = %err, "Token could not be issued");
                ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
            }
        }
    }
}

impl From<AuthenticationError> for ApiError {
    fn from(err: AuthenticationError) -> Self {
        match &err {
            AuthenticationError::InvalidCredentials => {}
            AuthenticationError::TimedOut => tracing::warn!("Login timed out"),
            AuthenticationError::Store(_) | AuthenticationError::Hashing(_) => {
                tracing::error!(error = %err, "Credential check failed")
            }
        }
        ApiError::Unauthorized(INVALID_CREDENTIALS_MESSAGE.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Authentication(e) => e.into(),
            AuthError::Token(e) => e.into(),
            AuthError::Store(UserStoreError::UsernameAlreadyExists(username)) => {
                ApiError::Conflict(format!("Username already exists: {}", username))
            }
            other => {
                tracing::error!(error = %other, "Authentication core failure");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    ValidationFailed(String),
    #[error("malformatted id")]
    InvalidId,
    #[error("expected `username` to be unique")]
    DuplicateUsername,
    #[error("not found")]
    NotFound,
    #[error("unknown endpoint")]
    UnknownEndpoint,

    // auth
    #[error("token missing")]
    Unauthorized,
    #[error("token invalid")]
    InvalidToken,
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Body of every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::ValidationFailed(_) | ApiError::InvalidId | ApiError::DuplicateUsername => {
                StatusCode::BAD_REQUEST
            }
            ApiError::NotFound | ApiError::UnknownEndpoint => StatusCode::NOT_FOUND,
            ApiError::Unauthorized | ApiError::InvalidToken | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::ValidationFailed(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Internal(e) => {
                error!(error = ?e, "internal error");
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// A path segment that cannot even be decoded is as malformed as a bad id.
impl From<PathRejection> for ApiError {
    fn from(_: PathRejection) -> Self {
        ApiError::InvalidId
    }
}

/// Parses a path id, telling malformed ids apart from absent ones.
pub fn parse_id(raw: &str) -> ApiResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw).map_err(|_| ApiError::InvalidId)
}

pub async fn unknown_endpoint() -> ApiError {
    ApiError::UnknownEndpoint
}

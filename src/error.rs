use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::auth::repo::StoreError;

pub const DUPLICATE_USER: &str = "Username or email already exists.";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0}")]
    Validation(String),
    #[error("{}", DUPLICATE_USER)]
    Conflict,
    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,
    #[error("{0}")]
    Unauthorized(String),
    #[error("user store timed out")]
    Timeout,
    #[error("user store error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) | AuthError::Conflict => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AuthError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            AuthError::Store(StoreError::Conflict) => StatusCode::BAD_REQUEST,
            AuthError::Store(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Infrastructure details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            AuthError::Store(StoreError::Conflict) => DUPLICATE_USER.to_string(),
            AuthError::Timeout => "Service temporarily unavailable".to_string(),
            AuthError::Store(_) | AuthError::Internal(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = ?self, %status, "request failed");
        }
        let body = Json(ErrorResponse {
            error: self.public_message(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_taxonomy_to_status_codes() {
        assert_eq!(AuthError::validation("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::Conflict.status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::Store(StoreError::Conflict).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AuthError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Timeout.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            AuthError::Internal(anyhow::anyhow!("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let err = AuthError::Internal(anyhow::anyhow!("connection refused at 10.0.0.3"));
        assert_eq!(err.public_message(), "Internal server error");
    }

    #[test]
    fn conflict_messages_match() {
        assert_eq!(AuthError::Conflict.public_message(), DUPLICATE_USER);
        assert_eq!(AuthError::Store(StoreError::Conflict).public_message(), DUPLICATE_USER);
    }
}

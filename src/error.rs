//! Application Errors
//!
//! Error taxonomy surfaced at the HTTP boundary. Every variant renders as
//! `{ "error": "<message>" }` with the matching status code.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::auth::jwt::TokenError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown email or wrong password. Deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Missing authentication token")]
    MissingToken,

    #[error("Invalid authentication token")]
    InvalidToken,

    #[error("Authentication token expired")]
    ExpiredToken,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::MissingToken => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken | AppError::ExpiredToken => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TokenError> for AppError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => AppError::ExpiredToken,
            TokenError::Invalid(_) => AppError::InvalidToken,
            TokenError::Encode(e) => {
                AppError::Internal(anyhow::Error::new(e).context("Failed to encode JWT token"))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let AppError::Internal(cause) = &self {
            // Full chain stays server-side; the client only sees the generic message
            tracing::error!("Internal error: {:#}", cause);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

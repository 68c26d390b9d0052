//! Authentication Models
//!
//! Data structures for authentication requests, responses, and token payloads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::database::models::{Action, Ngo, User};

/// Claims carried inside a token. Signed, not encrypted: never put secrets here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPayload {
    /// User unique identifier
    pub sub: Uuid,
    /// Organization the user belongs to
    pub ngo_id: Uuid,
}

/// Authenticated user information extracted from a verified JWT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub ngo_id: Uuid,
}

impl From<TokenPayload> for AuthUser {
    fn from(payload: TokenPayload) -> Self {
        Self {
            id: payload.sub,
            ngo_id: payload.ngo_id,
        }
    }
}

/// Login request payload. Unknown or missing fields are rejected.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body returned by a successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
    pub ngo: Ngo,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub actions: Vec<Action>,
}

/// Body returned by `GET /api/auth/me`
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: User,
    pub ngo: Ngo,
    pub actions: Vec<Action>,
}

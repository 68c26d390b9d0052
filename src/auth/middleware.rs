//! Authentication Middleware
//!
//! Axum middleware for full JWT validation on API routes.

use axum::{
    extract::{Request, State},
    http::{HeaderMap, header},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::auth::{guard::AUTH_COOKIE, jwt::JwtService, models::AuthUser};
use crate::error::AppError;

/// Authentication middleware that validates JWT tokens and injects user info
pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Pull the raw token from `Authorization: Bearer` or the `auth_token` cookie
    pub fn extract_token(headers: &HeaderMap) -> Option<String> {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(String::from)
            .or_else(|| {
                CookieJar::from_headers(headers)
                    .get(AUTH_COOKIE)
                    .map(|cookie| cookie.value().to_string())
                    .filter(|token| !token.is_empty())
            })
    }

    /// Reject the request unless it carries a valid token.
    ///
    /// No token yields 401, a bad or expired one 403.
    pub async fn require_auth(
        State(jwt_service): State<Arc<JwtService>>,
        mut req: Request,
        next: Next,
    ) -> Result<Response, AppError> {
        let Some(token) = Self::extract_token(req.headers()) else {
            tracing::warn!(
                "[AuthMiddleware] {} {}: no token supplied",
                req.method(),
                req.uri()
            );
            return Err(AppError::MissingToken);
        };

        let payload = jwt_service.verify(&token).map_err(|e| {
            tracing::warn!("[AuthMiddleware] {} {}: {}", req.method(), req.uri(), e);
            AppError::from(e)
        })?;

        let auth_user = AuthUser::from(payload);
        tracing::debug!(
            "[AuthMiddleware] authenticated user={} ngo={}",
            auth_user.id,
            auth_user.ngo_id
        );

        // Insert the user into request extensions for downstream handlers
        req.extensions_mut().insert(auth_user);

        Ok(next.run(req).await)
    }
}

//! Route Guard
//!
//! Navigation middleware for the dashboard pages. It only checks whether an
//! `auth_token` cookie is *present*; it never verifies it. A forged cookie
//! gets past the guard and is then refused by [`AuthMiddleware`] on the first
//! data request, so the guard is a redirect convenience and not a security
//! boundary.
//!
//! [`AuthMiddleware`]: crate::auth::middleware::AuthMiddleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use percent_encoding::percent_decode_str;
use std::sync::Arc;

/// Cookie the dashboard stores the token in after login
pub const AUTH_COOKIE: &str = "auth_token";

/// Static route classification for the guard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuardConfig {
    /// Path prefixes that require a credential
    pub protected_prefixes: Vec<String>,
    /// The login page
    pub login_path: String,
    /// Where an already-authenticated visitor of the login page is sent
    pub landing_path: String,
}

impl Default for RouteGuardConfig {
    fn default() -> Self {
        Self {
            protected_prefixes: vec!["/dashboard".to_string()],
            login_path: "/login".to_string(),
            landing_path: "/dashboard/ongs".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    PassThrough,
    Redirect(String),
}

/// Resolve a request path the way the static file server will: percent-decoded,
/// empty and `.` segments dropped, `..` applied. `//dashboard/./ongs/` and
/// `/%64ashboard/ongs` both become `/dashboard/ongs`.
pub fn normalize_path(raw: &str) -> String {
    let decoded = percent_decode_str(raw).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    format!("/{}", segments.join("/"))
}

impl RouteGuardConfig {
    /// Whether `path` falls under one of the protected prefixes.
    /// Matching respects segment boundaries: `/dashboard` covers
    /// `/dashboard/ongs` but not `/dashboards`.
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_prefixes.iter().any(|prefix| {
            let prefix = prefix.trim_end_matches('/');
            match path.strip_prefix(prefix) {
                Some(rest) => rest.is_empty() || rest.starts_with('/'),
                None => false,
            }
        })
    }

    pub fn is_login(&self, path: &str) -> bool {
        path == self.login_path
    }

    /// Single-pass redirect decision for one navigation request.
    /// `path` is the raw request path; it is normalized before matching.
    pub fn decide(&self, credential: Option<&str>, path: &str) -> GuardDecision {
        let has_credential = credential.is_some_and(|value| !value.is_empty());
        let path = normalize_path(path);

        if !has_credential && self.is_protected(&path) {
            GuardDecision::Redirect(self.login_path.clone())
        } else if has_credential && self.is_login(&path) {
            GuardDecision::Redirect(self.landing_path.clone())
        } else {
            GuardDecision::PassThrough
        }
    }
}

/// Axum middleware applying [`RouteGuardConfig::decide`] to page requests
pub async fn route_guard(
    State(config): State<Arc<RouteGuardConfig>>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let credential = jar.get(AUTH_COOKIE).map(|cookie| cookie.value());
    let path = req.uri().path().to_owned();

    match config.decide(credential, &path) {
        GuardDecision::Redirect(target) => {
            tracing::debug!("[RouteGuard] {} -> {}", path, target);
            Redirect::temporary(&target).into_response()
        }
        GuardDecision::PassThrough => next.run(req).await,
    }
}

//! Auth routes for login, logout, and session info

use axum::{
    Extension, Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    middleware,
    response::IntoResponse,
    routing::{get, post},
};

use crate::auth::{
    middleware::AuthMiddleware,
    models::{AuthUser, LoginRequest, LoginResponse, SessionResponse, TokenPayload},
};
use crate::error::{AppError, AppResult};
use crate::server::AppState;

pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AppResult<Json<LoginResponse>> {
    let Json(payload) = payload.map_err(|rejection| {
        tracing::debug!("Rejected login body: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })?;

    let outcome = app_state
        .auth_service
        .authenticate(&payload.email, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        user: outcome.user,
        ngo: outcome.ngo,
        token: outcome.token,
        token_type: "Bearer".to_string(),
        expires_in: app_state.auth_service.jwt_service().expires_in(),
        actions: outcome.actions,
    }))
}

pub async fn logout() -> impl IntoResponse {
    // Stateless tokens: nothing to revoke, the client drops its auth_token cookie
    StatusCode::NO_CONTENT
}

/// `/api/auth/me`: the session behind a verified token
pub async fn me(
    State(app_state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<SessionResponse>> {
    let payload = TokenPayload {
        sub: auth_user.id,
        ngo_id: auth_user.ngo_id,
    };
    let (user, ngo, actions) = app_state.auth_service.current_session(&payload).await?;

    Ok(Json(SessionResponse { user, ngo, actions }))
}

pub fn create_auth_routes(app_state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/api/auth/me", get(me))
        .layer(middleware::from_fn_with_state(
            app_state.jwt_service.clone(),
            AuthMiddleware::require_auth,
        ));

    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .merge(protected)
}

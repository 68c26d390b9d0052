//! # Server Module
//!
//! HTTP server setup and route configuration.

use anyhow::{Context, Result};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::auth::{guard::RouteGuardConfig, jwt::JwtService};
use crate::config::{Config, ServerConfig};
use crate::database::{DatabaseConnection, PgRepository};
use crate::routes::{self, health::ping};
use crate::services::authentication::AuthService;

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub jwt_service: Arc<JwtService>,
    pub auth_service: Arc<AuthService>,
    pub guard: Arc<RouteGuardConfig>,
}

/// Assemble the full application router
pub fn build_router(app_state: AppState, server: &ServerConfig) -> Result<Router> {
    let pages = routes::pages::create_page_routes(&server.static_dir, app_state.guard.clone());

    let origins = server
        .cors_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .context("Invalid origin in CORS_ORIGINS")?;

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::ORIGIN,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::AUTHORIZATION,
        ])
        .allow_credentials(true);

    let app = Router::new()
        .route("/ping", get(ping))
        // Form posts hit /login directly; page loads of /login fall through to the guarded bundle
        .route("/login", post(routes::auth::login).fallback_service(pages.clone()))
        .merge(routes::auth::create_auth_routes(&app_state))
        .fallback_service(pages)
        .layer(ServiceBuilder::new().layer(cors))
        .with_state(app_state);

    Ok(app)
}

/// Connect to the database, wire the services together and serve until shutdown.
pub async fn start(config: Config) -> Result<()> {
    let jwt_service = Arc::new(JwtService::new(&config.auth.jwt_secret));

    let db = DatabaseConnection::new(&config.database).await?;
    let repository = Arc::new(PgRepository::new(db.pool().clone()));

    let auth_service = Arc::new(AuthService::new(
        repository.clone(),
        repository.clone(),
        repository,
        jwt_service.clone(),
    ));

    let app_state = AppState {
        jwt_service,
        auth_service,
        guard: Arc::new(config.guard.clone()),
    };

    let app = build_router(app_state, &config.server)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Listening on http://{}", addr);
    tracing::info!("Health check available at http://{}/ping", addr);
    tracing::info!("Protected page prefixes: {:?}", config.guard.protected_prefixes);

    axum::serve(listener, app).await.context("HTTP server error")?;
    Ok(())
}

//! # NGO Transparency Server
//!
//! Authentication core of the NGO transparency dashboard: login with JWT
//! issuance, token verification on API routes, and a cookie-presence route
//! guard in front of the dashboard pages.
//!
//! ## Architecture
//! - `config`: environment configuration, loaded once at startup
//! - `auth`: token service, password hashing, API middleware, route guard
//! - `services`: the authentication use case
//! - `database`: Postgres pool, row models and repositories
//! - `routes`: HTTP handlers (`/ping`, `/api/auth/*`, dashboard pages)
//! - `server`: router assembly and the listener
//!
//! ## Environment Setup
//! `JWT_SECRET` and `DATABASE_URL` are required; a `.env` file is honoured.
//! ```bash
//! JWT_SECRET=change-me DATABASE_URL=postgres://localhost/ngo cargo run
//! ```
//!
//! To provision a user row, generate its password hash with:
//! ```bash
//! cargo run -- hash-password 'plaintext'
//! ```
//!
//! ## Health Check
//! ```bash
//! curl http://localhost:3000/ping
//! ```

mod auth;
mod cli;
mod config;
mod database;
mod error;
mod routes;
mod server;
mod services;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    if let Some(Command::HashPassword { plaintext }) = Cli::parse().command {
        match auth::password::hash_password(&plaintext) {
            Ok(hash) => println!("{}", hash),
            Err(e) => {
                eprintln!("{:#}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false) // Don't show module targets for cleaner output
                .compact(),
        )
        .init();

    tracing::info!("Starting {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    tracing::info!("Build profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });

    // A missing signing secret is fatal here, never a per-request error
    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::start(config).await {
        tracing::error!("Server stopped: {:#}", e);
        std::process::exit(1);
    }
}

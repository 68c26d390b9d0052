//! # Database Module
//!
//! PostgreSQL access through tokio-postgres and deadpool: connection pooling,
//! row models, and the repositories the authentication flow reads from.

pub mod connection;
pub mod models;
pub mod repositories;

pub use connection::DatabaseConnection;
pub use repositories::{ActionRepository, NgoRepository, PgRepository, UserRepository};

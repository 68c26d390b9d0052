//! Repositories
//!
//! Read-side contracts the authentication flow depends on, plus their
//! tokio-postgres implementations. Each lookup returns the entity or `None`
//! and fails only when the backing store does.

use anyhow::{Context, Result};
use async_trait::async_trait;
use deadpool_postgres::Pool;
use uuid::Uuid;

use crate::database::models::{Action, FromRow, Ngo, User};

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
}

#[async_trait]
pub trait NgoRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ngo>>;
}

#[async_trait]
pub trait ActionRepository: Send + Sync {
    async fn find_by_ngo_id(&self, ngo_id: Uuid) -> Result<Vec<Action>>;
}

/// Postgres-backed repositories sharing one connection pool
#[derive(Clone)]
pub struct PgRepository {
    pool: Pool,
}

impl PgRepository {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let row = client
            .query_opt(
                "SELECT id, name, email, password_hash, ngo_id FROM users WHERE email = $1",
                &[&email],
            )
            .await
            .context("Failed to query user by email")?;
        row.map(|r| User::from_row(&r)).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let row = client
            .query_opt(
                "SELECT id, name, email, password_hash, ngo_id FROM users WHERE id = $1",
                &[&id],
            )
            .await
            .context("Failed to query user by id")?;
        row.map(|r| User::from_row(&r)).transpose()
    }
}

#[async_trait]
impl NgoRepository for PgRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Ngo>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let row = client
            .query_opt(
                "SELECT id, name, description, created_at FROM ngos WHERE id = $1",
                &[&id],
            )
            .await
            .context("Failed to query ngo by id")?;
        row.map(|r| Ngo::from_row(&r)).transpose()
    }
}

#[async_trait]
impl ActionRepository for PgRepository {
    async fn find_by_ngo_id(&self, ngo_id: Uuid) -> Result<Vec<Action>> {
        let client = self.pool.get().await.context("Failed to get DB connection")?;
        let rows = client
            .query(
                "SELECT id, ngo_id, name, kind, value, date, description \
                 FROM actions WHERE ngo_id = $1 ORDER BY date DESC",
                &[&ngo_id],
            )
            .await
            .context("Failed to query actions by ngo")?;
        rows.iter().map(Action::from_row).collect()
    }
}

// Database Connection Management
//
// Handles PostgreSQL connection pooling using tokio-postgres and deadpool.

use anyhow::{Context, Result};
use deadpool_postgres::{Manager, ManagerConfig, Pool, RecyclingMethod, Runtime};
use native_tls::TlsConnector;
use postgres_native_tls::MakeTlsConnector;
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseConfig;

const POOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Database connection wrapper
#[derive(Debug, Clone)]
pub struct DatabaseConnection {
    pool: Pool,
}

impl DatabaseConnection {
    /// Create a pooled connection and make sure the database answers
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pg_config = tokio_postgres::Config::from_str(&config.url)
            .context("Failed to parse DATABASE_URL")?;

        let masked_host = format!(
            "{:?}/{}",
            pg_config.get_hosts().first(),
            pg_config.get_dbname().unwrap_or_default()
        );
        tracing::info!("Connecting to database: {}", masked_host);

        let tls_connector = TlsConnector::builder()
            .build()
            .context("Failed to build TLS connector")?;
        let tls = MakeTlsConnector::new(tls_connector);

        let mgr_config = ManagerConfig {
            recycling_method: RecyclingMethod::Fast,
        };
        let mgr = Manager::from_config(pg_config, tls, mgr_config);

        let pool = Pool::builder(mgr)
            .max_size(config.max_connections)
            .wait_timeout(Some(POOL_TIMEOUT))
            .create_timeout(Some(POOL_TIMEOUT))
            .recycle_timeout(Some(POOL_TIMEOUT))
            .runtime(Runtime::Tokio1)
            .build()
            .context("Failed to create database pool")?;

        let connection = Self { pool };
        connection.health_check().await?;

        tracing::info!("Database connection established");
        Ok(connection)
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<()> {
        let client = self
            .pool
            .get()
            .await
            .context("Failed to get connection for health check")?;

        client
            .query("SELECT 1", &[])
            .await
            .context("Database health check failed")?;
        Ok(())
    }
}

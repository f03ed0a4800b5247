use std::time::Duration;

use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use tracing::info;

use super::{env_flag, env_parse};
use crate::core::{AppError, Result};

/// MySQL connection settings, read only when `STORE_BACKEND=mysql`
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    /// Connections kept open while idle
    pub pool_size: u32,
    pub max_connections: u32,
    /// Wait for a free connection before a query fails as `StoreUnavailable`
    pub acquire_timeout: Duration,
    pub run_migrations: bool,
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self> {
        let url = std::env::var("DATABASE_URL").map_err(|_| {
            AppError::Configuration("DATABASE_URL is required when STORE_BACKEND=mysql".to_string())
        })?;

        Ok(Self {
            url,
            pool_size: env_parse("DATABASE_POOL_SIZE", "5")?,
            max_connections: env_parse("DATABASE_MAX_CONNECTIONS", "20")?,
            acquire_timeout: Duration::from_secs(env_parse("DATABASE_ACQUIRE_TIMEOUT_SECS", "5")?),
            run_migrations: env_flag("RUN_MIGRATIONS"),
        })
    }

    /// `host:port/database` with any credentials stripped
    pub fn target(&self) -> &str {
        self.url.rsplit('@').next().unwrap_or(&self.url)
    }

    /// Open the pool; an unreachable server maps to `StoreUnavailable`
    pub async fn connect(&self) -> Result<MySqlPool> {
        let pool = MySqlPoolOptions::new()
            .min_connections(self.pool_size)
            .max_connections(self.max_connections)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(&self.url)
            .await
            .map_err(|e| {
                AppError::StoreUnavailable(format!("Cannot reach {}: {}", self.target(), e))
            })?;

        info!(
            target_db = %self.target(),
            pool_size = self.pool_size,
            max_connections = self.max_connections,
            "MySQL pool ready"
        );
        Ok(pool)
    }

    /// Apply the schema embedded from `migrations/`
    pub async fn migrate(&self, pool: &MySqlPool) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(pool)
            .await
            .map_err(|e| AppError::Configuration(format!("Migration failed: {}", e)))?;
        info!("Schema migrations applied");
        Ok(())
    }
}

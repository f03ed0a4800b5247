use crate::core::timezone::parse_utc_offset;
use crate::core::{AppError, Result};
use chrono::FixedOffset;
use std::env;
use std::str::FromStr;
use tracing::Level;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Read `key` (or `default` when unset) and parse it
pub(crate) fn env_parse<T: FromStr>(key: &str, default: &str) -> Result<T> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    raw.trim()
        .parse()
        .map_err(|_| AppError::Configuration(format!("Invalid {}: '{}'", key, raw)))
}

/// `1`, `true` or `yes`, case-insensitive
pub(crate) fn env_flag(key: &str) -> bool {
    env::var(key)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    /// Present only for the MySQL backend
    pub database: Option<DatabaseConfig>,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    /// Default level for the crate's own spans when `RUST_LOG` is unset
    pub log_level: Level,
    pub log_format: LogFormat,
    /// Local offset used for every day/month/year boundary
    pub utc_offset: FixedOffset,
    pub store_backend: StoreBackend,
}

impl AppConfig {
    /// `EnvFilter` directives used when `RUST_LOG` is unset
    pub fn log_filter(&self) -> String {
        format!(
            "gymdesk={},actix_web=info",
            self.log_level.as_str().to_ascii_lowercase()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid LOG_FORMAT: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    MySql,
    Memory,
}

impl std::str::FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(StoreBackend::MySql),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(format!("Invalid STORE_BACKEND: {}", s)),
        }
    }
}

impl Config {
    /// Load configuration from the environment (and `.env` when present)
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let store_backend: StoreBackend = env_parse("STORE_BACKEND", "mysql")?;
        let raw_offset = env::var("GYM_UTC_OFFSET").unwrap_or_else(|_| "+00:00".to_string());

        Ok(Config {
            app: AppConfig {
                env: env_parse("APP_ENV", "development")?,
                log_level: env_parse("LOG_LEVEL", "info")?,
                log_format: env_parse("LOG_FORMAT", "pretty")?,
                utc_offset: parse_utc_offset(&raw_offset).map_err(AppError::Configuration)?,
                store_backend,
            },
            database: match store_backend {
                StoreBackend::MySql => Some(DatabaseConfig::from_env()?),
                StoreBackend::Memory => None,
            },
            server: ServerConfig::from_env()?,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.app.store_backend == StoreBackend::MySql && self.database.is_none() {
            return Err(AppError::Configuration(
                "STORE_BACKEND=mysql requires DATABASE_URL".to_string(),
            ));
        }

        if let Some(database) = &self.database {
            if database.pool_size > database.max_connections {
                return Err(AppError::Configuration(
                    "DATABASE_POOL_SIZE cannot exceed DATABASE_MAX_CONNECTIONS".to_string(),
                ));
            }
        }

        if self.server.workers == 0 {
            return Err(AppError::Configuration(
                "SERVER_WORKERS must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

use std::time::Duration;

use super::env_parse;
use crate::core::Result;

/// HTTP listener settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// Grace period for in-flight requests on shutdown
    pub shutdown_timeout: Duration,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            workers: num_cpus::get(),
            shutdown_timeout: Duration::from_secs(30),
        }
    }

    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(
            env_parse::<String>("SERVER_HOST", "127.0.0.1")?,
            env_parse("SERVER_PORT", "8080")?,
        );
        config.workers = env_parse("SERVER_WORKERS", &config.workers.to_string())?;
        config.shutdown_timeout =
            Duration::from_secs(env_parse("SERVER_SHUTDOWN_TIMEOUT_SECS", "30")?);
        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

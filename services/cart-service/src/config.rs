use shared::config::{env_or, env_string_or, ConfigError};
use shared::storage::StorageBackend;
use shared::DatabaseConfig;

pub const DEFAULT_PORT: u16 = 5003;

#[derive(Debug, Clone)]
pub struct CartServiceConfig {
    pub host: String,
    pub port: u16,
    pub storage_backend: StorageBackend,
    pub database: DatabaseConfig,
    pub services: UpstreamConfig,
}

#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub donations_url: String,
    pub notification_url: String,
    pub http_timeout_seconds: u64,
}

impl UpstreamConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            donations_url: env_string_or("DONATIONS_SERVICE_URL", "http://localhost:5000"),
            notification_url: env_string_or("NOTIFICATION_SERVICE_URL", "http://localhost:5001"),
            http_timeout_seconds: env_or("HTTP_CLIENT_TIMEOUT_SECONDS", 10)?,
        })
    }
}

impl CartServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_raw = env_string_or("CART_STORAGE_BACKEND", "postgres");
        let storage_backend =
            backend_raw
                .parse::<StorageBackend>()
                .map_err(|e| ConfigError::Invalid {
                    name: "CART_STORAGE_BACKEND".to_string(),
                    value: backend_raw.clone(),
                    reason: e.to_string(),
                })?;

        Ok(Self {
            host: env_string_or("CART_SERVICE_HOST", "127.0.0.1"),
            port: env_or("CART_SERVICE_PORT", DEFAULT_PORT)?,
            storage_backend,
            database: DatabaseConfig::from_env()?,
            services: UpstreamConfig::from_env()?,
        })
    }

    /// `host:port`, resolved by the listener so hostnames like `localhost` work.
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use super::{CartStore, MemoryCartStore, PostgresCartStore, StorageError};
use crate::config::DatabaseConfig;
use crate::db::DatabasePool;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Postgres,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = StorageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StorageBackend::Postgres),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(StorageError::Config(format!(
                "unknown storage backend '{}', expected 'postgres' or 'memory'",
                other
            ))),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::Postgres => f.write_str("postgres"),
            StorageBackend::Memory => f.write_str("memory"),
        }
    }
}

/// Builds the configured cart store. The Postgres backend connects and
/// applies pending migrations before returning.
pub async fn create_cart_store(
    backend: StorageBackend,
    database: &DatabaseConfig,
) -> Result<Arc<dyn CartStore>, StorageError> {
    info!("Initializing {} cart store", backend);

    match backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryCartStore::new())),
        StorageBackend::Postgres => {
            let db_pool = DatabasePool::from_config(database).await?;
            db_pool.run_migrations().await?;
            Ok(Arc::new(PostgresCartStore::new(db_pool)))
        }
    }
}

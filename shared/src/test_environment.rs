use anyhow::Result;
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

use crate::config::DatabaseConfig;
use crate::db::DatabasePool;

/// A throwaway Postgres instance with the cart schema applied. The container
/// is stopped when the environment is dropped.
pub struct TestEnvironment {
    pub db_pool: DatabasePool,
    database_url: String,
    _postgres: ContainerAsync<Postgres>,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let container = Postgres::default().start().await?;
        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let database_url = format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

        let db_pool = DatabasePool::new(&database_url).await?;
        db_pool.run_migrations().await?;

        Ok(Self {
            db_pool,
            database_url,
            _postgres: container,
        })
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig::with_url(self.database_url.clone())
    }
}

pub mod config;
pub mod db;
pub mod models;
pub mod storage;
pub mod telemetry;
pub mod test_environment;
pub mod utils;

pub use config::{ConfigError, DatabaseConfig};
pub use db::{DatabaseError, DatabasePool};
pub use storage::{CartStore, StorageError};

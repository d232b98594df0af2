pub mod factory;
pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::CartItem;

pub use factory::{create_cart_store, StorageBackend};
pub use memory::MemoryCartStore;
pub use postgres::PostgresCartStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Duplicate cart item: {0}")]
    Duplicate(String),
    #[error("Storage error: {0}")]
    Backend(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

#[async_trait]
pub trait CartStore: Send + Sync {
    /// Insert a new item. Fails with `Duplicate` if the user already has the
    /// same donation in their cart.
    async fn insert(&self, item: CartItem) -> Result<CartItem, StorageError>;

    async fn get(&self, id: &str) -> Result<Option<CartItem>, StorageError>;

    /// All items for a user, oldest first
    async fn list_for_user(&self, user_email: &str) -> Result<Vec<CartItem>, StorageError>;

    /// Returns true if an item was removed
    async fn remove(&self, id: &str) -> Result<bool, StorageError>;

    /// Conditionally move a pending item to `claimed`. `None` means the item
    /// is missing or was no longer pending.
    async fn mark_claimed(
        &self,
        id: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError>;

    async fn mark_cancelled(
        &self,
        id: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError>;

    async fn ping(&self) -> Result<(), StorageError>;

    fn backend_name(&self) -> &'static str;
}

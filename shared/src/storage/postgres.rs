use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{CartStore, StorageError};
use crate::db::repositories::CartItemRepository;
use crate::db::{DatabaseError, DatabasePool};
use crate::models::CartItem;

pub struct PostgresCartStore {
    db_pool: DatabasePool,
    repo: CartItemRepository,
}

impl PostgresCartStore {
    pub fn new(db_pool: DatabasePool) -> Self {
        let repo = CartItemRepository::new(db_pool.pool());
        Self { db_pool, repo }
    }
}

impl From<DatabaseError> for StorageError {
    fn from(err: DatabaseError) -> Self {
        match err {
            DatabaseError::ConstraintViolation(msg) => StorageError::Duplicate(msg),
            other => StorageError::Backend(other.to_string()),
        }
    }
}

#[async_trait]
impl CartStore for PostgresCartStore {
    async fn insert(&self, item: CartItem) -> Result<CartItem, StorageError> {
        Ok(self.repo.create(&item).await?)
    }

    async fn get(&self, id: &str) -> Result<Option<CartItem>, StorageError> {
        Ok(self.repo.find_by_id(id).await?)
    }

    async fn list_for_user(&self, user_email: &str) -> Result<Vec<CartItem>, StorageError> {
        Ok(self.repo.find_by_user_email(user_email).await?)
    }

    async fn remove(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.repo.delete(id).await?)
    }

    async fn mark_claimed(
        &self,
        id: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError> {
        Ok(self.repo.mark_claimed(id, claimed_at).await?)
    }

    async fn mark_cancelled(
        &self,
        id: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError> {
        Ok(self.repo.mark_cancelled(id, cancelled_at).await?)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(self.db_pool.ping().await?)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}

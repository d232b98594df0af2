use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shared::models::CartItem;
use shared::storage::MemoryCartStore;
use shared::{CartStore, StorageError};
use std::sync::Arc;

fn backend_down() -> StorageError {
    StorageError::Backend("connection refused".to_string())
}

/// A store whose backend is gone: every call fails.
pub struct UnavailableStore;

#[async_trait]
impl CartStore for UnavailableStore {
    async fn insert(&self, _item: CartItem) -> Result<CartItem, StorageError> {
        Err(backend_down())
    }

    async fn get(&self, _id: &str) -> Result<Option<CartItem>, StorageError> {
        Err(backend_down())
    }

    async fn list_for_user(&self, _user_email: &str) -> Result<Vec<CartItem>, StorageError> {
        Err(backend_down())
    }

    async fn remove(&self, _id: &str) -> Result<bool, StorageError> {
        Err(backend_down())
    }

    async fn mark_claimed(
        &self,
        _id: &str,
        _claimed_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError> {
        Err(backend_down())
    }

    async fn mark_cancelled(
        &self,
        _id: &str,
        _cancelled_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError> {
        Err(backend_down())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Err(backend_down())
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

/// Wraps a memory store but cancels the item right before any claim lands,
/// as if a concurrent cancel request had won.
pub struct CancelBeforeClaimStore {
    inner: Arc<MemoryCartStore>,
}

impl CancelBeforeClaimStore {
    pub fn new(inner: Arc<MemoryCartStore>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl CartStore for CancelBeforeClaimStore {
    async fn insert(&self, item: CartItem) -> Result<CartItem, StorageError> {
        self.inner.insert(item).await
    }

    async fn get(&self, id: &str) -> Result<Option<CartItem>, StorageError> {
        self.inner.get(id).await
    }

    async fn list_for_user(&self, user_email: &str) -> Result<Vec<CartItem>, StorageError> {
        self.inner.list_for_user(user_email).await
    }

    async fn remove(&self, id: &str) -> Result<bool, StorageError> {
        self.inner.remove(id).await
    }

    async fn mark_claimed(
        &self,
        id: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError> {
        self.inner.mark_cancelled(id, claimed_at).await?;
        self.inner.mark_claimed(id, claimed_at).await
    }

    async fn mark_cancelled(
        &self,
        id: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError> {
        self.inner.mark_cancelled(id, cancelled_at).await
    }

    async fn ping(&self) -> Result<(), StorageError> {
        self.inner.ping().await
    }

    fn backend_name(&self) -> &'static str {
        self.inner.backend_name()
    }
}

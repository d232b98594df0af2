use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::{CartStore, StorageError};
use crate::models::{CartItem, CartItemStatus};

/// Process-local cart store. Used for tests and for running the service
/// without a database; contents are lost on restart.
#[derive(Default)]
pub struct MemoryCartStore {
    items: DashMap<String, CartItem>,
    // (user_email, donation_id) -> item id
    by_pair: DashMap<(String, String), String>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn transition(
        &self,
        id: &str,
        next: CartItemStatus,
        at: DateTime<Utc>,
    ) -> Option<CartItem> {
        let mut entry = self.items.get_mut(id)?;
        if !entry.status.can_transition_to(next) {
            return None;
        }
        entry.status = next;
        match next {
            CartItemStatus::Claimed => entry.claimed_at = Some(at),
            CartItemStatus::Cancelled => entry.cancelled_at = Some(at),
            CartItemStatus::Pending => {}
        }
        Some(entry.value().clone())
    }
}

#[async_trait]
impl CartStore for MemoryCartStore {
    async fn insert(&self, item: CartItem) -> Result<CartItem, StorageError> {
        let key = (item.user_email.clone(), item.donation_id.clone());
        match self.by_pair.entry(key) {
            Entry::Occupied(_) => Err(StorageError::Duplicate(format!(
                "Item already in cart: {} already holds donation {}",
                item.user_email, item.donation_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(item.id.clone());
                self.items.insert(item.id.clone(), item.clone());
                Ok(item)
            }
        }
    }

    async fn get(&self, id: &str) -> Result<Option<CartItem>, StorageError> {
        Ok(self.items.get(id).map(|item| item.value().clone()))
    }

    async fn list_for_user(&self, user_email: &str) -> Result<Vec<CartItem>, StorageError> {
        let mut items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|entry| entry.user_email == user_email)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn remove(&self, id: &str) -> Result<bool, StorageError> {
        match self.items.remove(id) {
            Some((_, item)) => {
                self.by_pair.remove(&(item.user_email, item.donation_id));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_claimed(
        &self,
        id: &str,
        claimed_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError> {
        Ok(self.transition(id, CartItemStatus::Claimed, claimed_at))
    }

    async fn mark_cancelled(
        &self,
        id: &str,
        cancelled_at: DateTime<Utc>,
    ) -> Result<Option<CartItem>, StorageError> {
        Ok(self.transition(id, CartItemStatus::Cancelled, cancelled_at))
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

use chrono::Utc;
use futures::future::join_all;
use shared::models::{CartItem, EnrichedCartItem};
use shared::utils::canonical_ulid;
use shared::CartStore;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::clients::{Donation, DonationsClient, DonorNotification, NotificationClient};
use crate::error::CartError;

/// Cart operations. Holds the store and the clients for the two services a
/// claim has to talk to.
#[derive(Clone)]
pub struct CartService {
    store: Arc<dyn CartStore>,
    donations: DonationsClient,
    notifications: NotificationClient,
}

impl CartService {
    pub fn new(
        store: Arc<dyn CartStore>,
        donations: DonationsClient,
        notifications: NotificationClient,
    ) -> Self {
        Self {
            store,
            donations,
            notifications,
        }
    }

    pub fn store(&self) -> &Arc<dyn CartStore> {
        &self.store
    }

    pub async fn add_item(
        &self,
        user_email: String,
        donation_id: String,
        notes: String,
    ) -> Result<CartItem, CartError> {
        let donation = self.fetch_donation(&donation_id).await?;
        if !donation.as_ref().is_some_and(|d| d.available) {
            return Err(CartError::DonationNotAvailable);
        }

        let item = self
            .store
            .insert(CartItem::new_pending(user_email, donation_id, notes))
            .await?;

        info!(
            item_id = %item.id,
            donation_id = %item.donation_id,
            "Added donation to cart"
        );
        Ok(item)
    }

    /// Lists a user's cart with donation details attached. Items whose
    /// donation can no longer be fetched are left out.
    pub async fn list_items(&self, user_email: &str) -> Result<Vec<EnrichedCartItem>, CartError> {
        let items = self.store.list_for_user(user_email).await?;

        let lookups = join_all(
            items
                .iter()
                .map(|item| self.donations.get_donation(&item.donation_id)),
        )
        .await;

        let enriched = items
            .into_iter()
            .zip(lookups)
            .filter_map(|(item, lookup)| match lookup {
                Ok(Some(donation)) => Some(EnrichedCartItem {
                    item,
                    donation_details: donation.details,
                }),
                Ok(None) => {
                    warn!(
                        "Dropping cart item {}: donation {} not found",
                        item.id, item.donation_id
                    );
                    None
                }
                Err(e) => {
                    warn!(
                        "Dropping cart item {}: failed to fetch donation {}: {}",
                        item.id, item.donation_id, e
                    );
                    None
                }
            })
            .collect();

        Ok(enriched)
    }

    pub async fn remove_item(&self, item_id: &str) -> Result<(), CartError> {
        let item = self.find_item(item_id).await?;

        if !self.store.remove(&item.id).await? {
            return Err(CartError::ItemNotFound);
        }

        info!(item_id = %item.id, "Removed item from cart");
        Ok(())
    }

    pub async fn claim_item(&self, item_id: &str) -> Result<CartItem, CartError> {
        let item = self.find_item(item_id).await?;
        if !item.is_pending() {
            return Err(CartError::AlreadyProcessed);
        }

        let donation = match self.fetch_donation(&item.donation_id).await? {
            Some(donation) if donation.available => donation,
            _ => return Err(CartError::DonationNoLongerAvailable),
        };

        if let Err(e) = self.donations.mark_unavailable(&item.donation_id).await {
            warn!(
                "Failed to mark donation {} unavailable: {}",
                item.donation_id, e
            );
            return Err(CartError::DonationUpdateFailed);
        }

        let claimed = match self.store.mark_claimed(&item.id, Utc::now()).await? {
            Some(claimed) => claimed,
            None => {
                // Lost a race with another claim or cancel after the donation
                // was already marked unavailable.
                warn!(
                    "Cart item {} changed state during claim; donation {} stays unavailable",
                    item.id, item.donation_id
                );
                return Err(CartError::AlreadyProcessed);
            }
        };

        self.notify_donor(&donation).await;

        info!(
            item_id = %claimed.id,
            donation_id = %claimed.donation_id,
            "Cart item claimed"
        );
        Ok(claimed)
    }

    pub async fn cancel_item(&self, item_id: &str) -> Result<CartItem, CartError> {
        let item = self.find_item(item_id).await?;
        if !item.is_pending() {
            return Err(CartError::AlreadyProcessed);
        }

        let cancelled = self
            .store
            .mark_cancelled(&item.id, Utc::now())
            .await?
            .ok_or(CartError::AlreadyProcessed)?;

        info!(item_id = %cancelled.id, "Cart item cancelled");
        Ok(cancelled)
    }

    async fn find_item(&self, item_id: &str) -> Result<CartItem, CartError> {
        let item_id = canonical_ulid(item_id).ok_or(CartError::InvalidItemId)?;

        self.store
            .get(&item_id)
            .await?
            .ok_or(CartError::ItemNotFound)
    }

    async fn fetch_donation(&self, donation_id: &str) -> Result<Option<Donation>, CartError> {
        self.donations
            .get_donation(donation_id)
            .await
            .map_err(|e| CartError::DonationsUnavailable(e.to_string()))
    }

    async fn notify_donor(&self, donation: &Donation) {
        let Some(email) = donation.email.clone() else {
            warn!("Donation {} has no donor email; skipping notification", donation.id);
            return;
        };

        let notification = DonorNotification {
            email,
            id: donation.id.clone(),
            description: donation.details.description.clone(),
        };

        match self.notifications.send(&notification).await {
            Ok(()) => debug!("Notified donor of donation {}", donation.id),
            Err(e) => warn!(
                "Failed to notify donor of donation {}: {}",
                donation.id, e
            ),
        }
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use utoipa::ToSchema;

use crate::utils::generate_ulid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "cart_item_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CartItemStatus {
    Pending,
    Claimed,
    Cancelled,
}

impl CartItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CartItemStatus::Pending => "pending",
            CartItemStatus::Claimed => "claimed",
            CartItemStatus::Cancelled => "cancelled",
        }
    }

    /// Only pending items may move; claimed and cancelled are terminal.
    pub fn can_transition_to(&self, next: CartItemStatus) -> bool {
        matches!(
            (self, next),
            (CartItemStatus::Pending, CartItemStatus::Claimed)
                | (CartItemStatus::Pending, CartItemStatus::Cancelled)
        )
    }
}

impl fmt::Display for CartItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A donation reserved by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct CartItem {
    #[schema(example = "01JGF7V3E0Y2R1X8P5Q7W9T4N6")]
    pub id: String,
    #[schema(example = "user@example.com")]
    pub user_email: String,
    #[schema(example = "64a89f1234abcdef5678abcd")]
    pub donation_id: String,
    #[schema(example = "I can pick it up on weekends")]
    pub notes: String,
    pub status: CartItemStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claimed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl CartItem {
    pub fn new_pending(
        user_email: impl Into<String>,
        donation_id: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: generate_ulid(),
            user_email: user_email.into(),
            donation_id: donation_id.into(),
            notes: notes.into(),
            status: CartItemStatus::Pending,
            created_at: Utc::now(),
            claimed_at: None,
            cancelled_at: None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == CartItemStatus::Pending
    }
}

/// The display fields of a donation, copied from the donations service.
/// Scalars of any JSON type are read as text; other values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DonationDetails {
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub condition: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub city: Option<String>,
}

pub fn deserialize_lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<JsonValue>::deserialize(deserializer)? {
        Some(JsonValue::String(value)) => Some(value),
        Some(JsonValue::Number(value)) => Some(value.to_string()),
        Some(JsonValue::Bool(value)) => Some(value.to_string()),
        _ => None,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct EnrichedCartItem {
    #[serde(flatten)]
    pub item: CartItem,
    pub donation_details: DonationDetails,
}

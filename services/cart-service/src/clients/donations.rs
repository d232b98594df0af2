use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Deserializer};
use serde_json::{json, Value as JsonValue};
use shared::models::{deserialize_lenient_string, DonationDetails};
use std::time::Duration;
use tracing::{debug, warn};

use super::{build_http_client, join_segments, parse_base_url, ClientError};

/// A donation as returned by the donations service. Fields this service does
/// not use are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct Donation {
    #[serde(default)]
    pub id: JsonValue,
    #[serde(default, deserialize_with = "deserialize_lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub available: bool,
    #[serde(flatten)]
    pub details: DonationDetails,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(i64),
    Float(f64),
    Text(String),
    Other(JsonValue),
}

// The donations service stores availability as whatever it was last patched
// with, so "false" and 0 show up next to real booleans.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = Option::<Flag>::deserialize(deserializer)?;
    Ok(match flag {
        Some(Flag::Bool(value)) => value,
        Some(Flag::Number(value)) => value != 0,
        Some(Flag::Float(value)) => value != 0.0,
        Some(Flag::Text(value)) => matches!(
            value.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        Some(Flag::Other(_)) | None => false,
    })
}

#[derive(Clone)]
pub struct DonationsClient {
    client: Client,
    base_url: Url,
}

impl DonationsClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    /// Fetches a donation. Any status other than 200, or a body that is not a
    /// donation, is reported as `None`; only transport failures are errors.
    pub async fn get_donation(&self, donation_id: &str) -> Result<Option<Donation>, ClientError> {
        let url = join_segments(&self.base_url, &["api", "donations", donation_id]);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            debug!(
                "Donations service returned {} for donation {}",
                status, donation_id
            );
            return Ok(None);
        }

        match response.json::<Donation>().await {
            Ok(donation) => Ok(Some(donation)),
            Err(e) if e.is_decode() => {
                warn!("Unreadable donation {} from donations service: {}", donation_id, e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn mark_unavailable(&self, donation_id: &str) -> Result<(), ClientError> {
        let url = join_segments(
            &self.base_url,
            &["api", "donations", donation_id, "availability"],
        );
        // The donations service expects the flag as a string
        let response = self
            .client
            .patch(url)
            .json(&json!({ "available": "false" }))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

use reqwest::{Client, Url};
use serde::Serialize;
use serde_json::Value as JsonValue;
use std::time::Duration;

use super::{build_http_client, join_segments, parse_base_url, ClientError};

/// Payload for the donor notification sent after a claim.
#[derive(Debug, Clone, Serialize)]
pub struct DonorNotification {
    pub email: String,
    pub id: JsonValue,
    pub description: Option<String>,
}

#[derive(Clone)]
pub struct NotificationClient {
    client: Client,
    base_url: Url,
}

impl NotificationClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        Ok(Self {
            client: build_http_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub async fn send(&self, notification: &DonorNotification) -> Result<(), ClientError> {
        let url = join_segments(&self.base_url, &["sendNotification"]);
        let response = self.client.post(url).json(notification).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

pub mod donations;
pub mod notifications;

use reqwest::{Client, Url};
use std::time::Duration;
use thiserror::Error;

pub use donations::{Donation, DonationsClient};
pub use notifications::{DonorNotification, NotificationClient};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid service URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Unexpected response status {status}: {body}")]
    UnexpectedStatus { status: u16, body: String },
}

fn build_http_client(timeout: Duration) -> Result<Client, ClientError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let url = Url::parse(raw).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl {
            url: raw.to_string(),
            reason: "not a base URL".to_string(),
        });
    }
    Ok(url)
}

/// Appends path segments to `base`, percent-encoding each one so ids taken
/// from request paths cannot change the route on the remote service.
fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use shared::StorageError;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Item not found in cart")]
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum CartError {
    #[error("Missing required fields")]
    MissingFields,
    #[error("Donation not available")]
    DonationNotAvailable,
    #[error("Item already in cart")]
    AlreadyInCart(String),
    #[error("Invalid cart item ID")]
    InvalidItemId,
    #[error("Item not found in cart")]
    ItemNotFound,
    #[error("Item already processed")]
    AlreadyProcessed,
    #[error("Donation no longer available")]
    DonationNoLongerAvailable,
    #[error("Could not update donation status")]
    DonationUpdateFailed,
    #[error("Donations service unavailable")]
    DonationsUnavailable(String),
    #[error("Internal server error")]
    Storage(StorageError),
}

impl From<StorageError> for CartError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Duplicate(details) => CartError::AlreadyInCart(details),
            other => CartError::Storage(other),
        }
    }
}

impl CartError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CartError::MissingFields
            | CartError::AlreadyInCart(_)
            | CartError::InvalidItemId
            | CartError::AlreadyProcessed
            | CartError::DonationNoLongerAvailable
            | CartError::DonationUpdateFailed => StatusCode::BAD_REQUEST,
            CartError::DonationNotAvailable | CartError::ItemNotFound => StatusCode::NOT_FOUND,
            CartError::DonationsUnavailable(_) => StatusCode::BAD_GATEWAY,
            CartError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn details(&self) -> Option<String> {
        match self {
            CartError::AlreadyInCart(details) => Some(details.clone()),
            _ => None,
        }
    }
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            CartError::Storage(e) => error!("Cart storage failure: {}", e),
            CartError::DonationsUnavailable(e) => error!("Donations service unreachable: {}", e),
            _ => {}
        }

        let body = ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        };
        (status, Json(body)).into_response()
    }
}

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub storage_backend: String,
    pub storage: String,
}

/// Service health, including whether the cart store is reachable
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Cart store unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.cart.store();
    let (status_code, status, storage) = match store.ping().await {
        Ok(()) => (StatusCode::OK, "healthy", "connected"),
        Err(e) => {
            error!("Health check failed to reach cart store: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "disconnected")
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status: status.to_string(),
            service: "cart-service".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            storage_backend: store.backend_name().to_string(),
            storage: storage.to_string(),
        }),
    )
}

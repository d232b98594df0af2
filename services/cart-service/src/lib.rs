use axum::{
    routing::{get, post},
    Router,
};
use shared::CartStore;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod service;

pub use config::CartServiceConfig;
pub use error::{CartError, ErrorResponse};
pub use handlers::cart::{AddToCartRequest, MessageResponse};
pub use service::CartService;

use clients::{ClientError, DonationsClient, NotificationClient};
use config::UpstreamConfig;

#[derive(Clone)]
pub struct AppState {
    pub cart: CartService,
}

impl AppState {
    pub fn new(store: Arc<dyn CartStore>, upstream: &UpstreamConfig) -> Result<Self, ClientError> {
        let timeout = Duration::from_secs(upstream.http_timeout_seconds);
        let donations = DonationsClient::new(&upstream.donations_url, timeout)?;
        let notifications = NotificationClient::new(&upstream.notification_url, timeout)?;

        Ok(Self {
            cart: CartService::new(store, donations, notifications),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    // A single `:id` capture is shared by every /cart/{..} route; it is a
    // user email for GET and a cart item id everywhere else.
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/cart", post(handlers::cart::add_to_cart))
        .route(
            "/cart/:id",
            get(handlers::cart::get_cart).delete(handlers::cart::remove_from_cart),
        )
        .route("/cart/:id/claim", post(handlers::cart::claim_item))
        .route("/cart/:id/cancel", post(handlers::cart::cancel_item))
        .route("/apidocs", get(handlers::docs::swagger_ui))
        .route(
            handlers::docs::OPENAPI_JSON_PATH,
            get(handlers::docs::openapi_json),
        )
        .layer(
            ServiceBuilder::new()
                .layer(middleware::trace_layer())
                .layer(middleware::cors_layer()),
        )
        .with_state(state)
}

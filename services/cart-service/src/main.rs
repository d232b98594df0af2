use anyhow::Result;
use dotenvy::dotenv;
use shared::storage::create_cart_store;
use shared::telemetry::{self, TelemetryConfig};
use tracing::{error, info};

use cart_service::{create_app, AppState, CartServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    let telemetry_config = TelemetryConfig::from_env("cart-service")?;
    telemetry::init_telemetry(telemetry_config)?;

    let config = CartServiceConfig::from_env()?;
    info!(
        "Starting Cart Service (storage: {}, donations: {}, notifications: {})",
        config.storage_backend, config.services.donations_url, config.services.notification_url
    );

    let store = create_cart_store(config.storage_backend, &config.database).await?;
    let state = AppState::new(store, &config.services)?;
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.listen_address()).await?;
    info!("Cart Service listening on {}", listener.local_addr()?);
    info!("API docs available at http://{}/apidocs", config.listen_address());

    if let Err(e) = axum::serve(listener, app).await {
        error!("HTTP server stopped: {:?}", e);
    }

    Ok(())
}

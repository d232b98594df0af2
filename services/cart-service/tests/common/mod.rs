pub mod mock_donations;
pub mod mock_notifier;
pub mod test_stores;

use anyhow::Result;
use axum_test::TestServer;
use cart_service::config::UpstreamConfig;
use cart_service::{create_app, AppState};
use mock_donations::MockDonationsService;
use mock_notifier::MockNotifier;
use shared::storage::MemoryCartStore;
use shared::CartStore;
use std::sync::Arc;

pub const TEST_USER: &str = "user@example.com";
pub const OTHER_USER: &str = "other@example.com";

/// Nothing listens on port 1, so connections are refused immediately.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:1";

pub struct TestFixture {
    pub app: axum::Router,
    pub store: Arc<MemoryCartStore>,
    pub donations: MockDonationsService,
    pub notifier: MockNotifier,
}

impl TestFixture {
    pub fn server(&self) -> TestServer {
        TestServer::new(self.app.clone()).unwrap()
    }
}

pub async fn setup_test_fixture() -> Result<TestFixture> {
    let donations = MockDonationsService::start().await?;
    let notifier = MockNotifier::start().await?;
    let donations_url = donations.base_url.clone();
    build_fixture(donations, notifier, &donations_url, |store| store as Arc<dyn CartStore>)
}

/// Serves the app from the store returned by `wrap`. `TestFixture::store`
/// is still the memory store handed to `wrap`, so tests can inspect it.
pub async fn setup_fixture_with_store<F>(wrap: F) -> Result<TestFixture>
where
    F: FnOnce(Arc<MemoryCartStore>) -> Arc<dyn CartStore>,
{
    let donations = MockDonationsService::start().await?;
    let notifier = MockNotifier::start().await?;
    let donations_url = donations.base_url.clone();
    build_fixture(donations, notifier, &donations_url, wrap)
}

/// Same as `setup_test_fixture`, but the service is pointed at a donations
/// URL that refuses connections.
pub async fn setup_fixture_without_donations() -> Result<TestFixture> {
    let donations = MockDonationsService::start().await?;
    let notifier = MockNotifier::start().await?;
    build_fixture(donations, notifier, UNREACHABLE_URL, |store| store as Arc<dyn CartStore>)
}

fn build_fixture<F>(
    donations: MockDonationsService,
    notifier: MockNotifier,
    donations_url: &str,
    wrap: F,
) -> Result<TestFixture>
where
    F: FnOnce(Arc<MemoryCartStore>) -> Arc<dyn CartStore>,
{
    let upstream = UpstreamConfig {
        donations_url: donations_url.to_string(),
        notification_url: notifier.base_url.clone(),
        http_timeout_seconds: 5,
    };

    let store = Arc::new(MemoryCartStore::new());
    let state = AppState::new(wrap(store.clone()), &upstream)?;
    let app = create_app(state);

    Ok(TestFixture {
        app,
        store,
        donations,
        notifier,
    })
}

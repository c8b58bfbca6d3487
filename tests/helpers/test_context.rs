//! Test context for unified test setup
//!
//! Wires an [`AdminContext`] to an in-process store and bucket while keeping
//! handles on both, so tests can inspect what a handler actually wrote.

use std::sync::Arc;
use std::time::Duration;
use DealerDesk::config::CacheConfig;
use DealerDesk::database::MemoryStore;
use DealerDesk::services::{CacheNotifier, MemoryBucket};
use DealerDesk::{AdminContext, DatabaseService, ServiceFactory};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const CACHE_PATH: &str = "/api/cache/invalidate";
pub const CACHE_KEY: &str = "test-cache-key";

pub struct TestContext {
    pub store: MemoryStore,
    pub bucket: MemoryBucket,
    pub admin: AdminContext,
}

impl TestContext {
    /// Context with cache notifications disabled
    pub fn new() -> Self {
        Self::with_notifier(CacheNotifier::disabled())
    }

    pub fn with_notifier(notifier: CacheNotifier) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let store = MemoryStore::new();
        let bucket = MemoryBucket::default();
        let db = DatabaseService::new(Arc::new(store.clone()));
        let services = ServiceFactory::with_parts(&db, Arc::new(bucket.clone()), notifier);

        Self {
            store,
            bucket,
            admin: AdminContext::new(db, services),
        }
    }

    /// Context whose notifier posts to a mock cache endpoint accepting everything
    pub async fn with_cache_server() -> (Self, MockServer) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CACHE_PATH))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let config = CacheConfig {
            enabled: true,
            endpoint: format!("{}{}", server.uri(), CACHE_PATH),
            api_key: Some(CACHE_KEY.to_string()),
            timeout_seconds: 2,
        };
        let notifier = CacheNotifier::new(&config).expect("notifier builds");
        (Self::with_notifier(notifier), server)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait until the mock server has seen at least `count` requests
///
/// Notifications are fire-and-forget, so tests poll instead of joining.
pub async fn wait_for_requests(server: &MockServer, count: usize) -> Vec<wiremock::Request> {
    for _ in 0..100 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    server.received_requests().await.unwrap_or_default()
}

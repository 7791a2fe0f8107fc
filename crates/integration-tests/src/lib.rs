//! Integration tests for ArtVista.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p artvista-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `session_flows` - Credential flows end-to-end over the in-memory store
//! - `cart_persistence` - Cart mutations, totals and restore behavior
//!
//! The helper here wires a [`TestContext`] the way the embedding
//! application would: a seeded directory and catalog, both services over
//! one shared in-memory store, and a recording sink in place of the toast
//! layer.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Mutex};

use artvista_storefront::catalog::Catalog;
use artvista_storefront::config::StorefrontConfig;
use artvista_storefront::directory::UserDirectory;
use artvista_storefront::notify::{Notice, NotificationSink};
use artvista_storefront::services::cart::CartService;
use artvista_storefront::services::session::SessionManager;
use artvista_storefront::storage::MemoryStore;

/// Sink that records every outcome event for assertions.
#[derive(Default)]
pub struct RecordingSink {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingSink {
    /// Everything notified so far, in order.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().expect("sink lock poisoned").clone()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .expect("sink lock poisoned")
            .push(notice);
    }
}

/// Everything a flow test needs, wired like the real application.
pub struct TestContext {
    pub catalog: Catalog,
    pub session: SessionManager,
    pub cart: CartService,
    pub store: Arc<MemoryStore>,
    pub sink: Arc<RecordingSink>,
}

impl TestContext {
    /// A context with seeded accounts and artworks, zero simulated delay.
    #[must_use]
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let sink = Arc::new(RecordingSink::default());
        let config = StorefrontConfig::without_delay();

        let session = SessionManager::new(
            Arc::new(UserDirectory::with_seed_users()),
            store.clone(),
            sink.clone(),
            &config,
        );
        let cart = CartService::new(store.clone(), sink.clone());

        Self {
            catalog: Catalog::with_seed_data(),
            session,
            cart,
            store,
            sink,
        }
    }

    /// A fresh context over this context's store, as after a page reload.
    #[must_use]
    pub fn reload(&self) -> Self {
        let sink = Arc::new(RecordingSink::default());
        let config = StorefrontConfig::without_delay();

        let session = SessionManager::new(
            Arc::new(UserDirectory::with_seed_users()),
            self.store.clone(),
            sink.clone(),
            &config,
        );
        let cart = CartService::new(self.store.clone(), sink.clone());
        session.restore_session();
        cart.restore_cart();

        Self {
            catalog: Catalog::with_seed_data(),
            session,
            cart,
            store: self.store.clone(),
            sink,
        }
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

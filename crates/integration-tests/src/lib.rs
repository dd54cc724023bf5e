//! Integration tests for the TechStore storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p techstore-integration-tests
//! ```
//!
//! Everything runs in-process: HTTP tests drive the router with
//! `tower::ServiceExt::oneshot`, and persistence tests use a JSON file in the
//! system temp directory.
//!
//! # Test Categories
//!
//! - `catalog_filtering` - Filter, sort and pagination over the real catalog
//! - `cart_persistence` - Cart and session surviving a restart
//! - `http_api` - Routes, status codes and error bodies
//! - `simulated_operations` - Pending-operation rules under simulated latency

use std::path::{Path, PathBuf};
use std::sync::Arc;

use techstore_storefront::config::{SimulatedDelays, StorefrontConfig};
use techstore_storefront::persistence::{
    FileStore, KeyValueStore, Persistence, StoreError,
};
use techstore_storefront::state::AppState;

/// Config with no simulated latency.
#[must_use]
pub fn instant_config() -> StorefrontConfig {
    StorefrontConfig {
        delays: SimulatedDelays::none(),
        ..StorefrontConfig::default()
    }
}

/// In-memory state with no simulated latency.
#[must_use]
pub fn instant_state() -> AppState {
    AppState::new(instant_config(), Persistence::in_memory())
}

/// State with the default delays, for tests that run on a paused clock.
#[must_use]
pub fn delayed_state() -> AppState {
    AppState::new(StorefrontConfig::default(), Persistence::in_memory())
}

/// A data file path unique to one test. The file itself is not created.
#[must_use]
pub fn temp_data_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("techstore-{name}-{}.json", uuid::Uuid::new_v4()))
}

/// State persisted to `path`, as the CLI and a restarted server see it.
#[must_use]
pub fn file_state(path: &Path) -> AppState {
    let config = StorefrontConfig {
        data_path: Some(path.to_path_buf()),
        ..instant_config()
    };
    AppState::new(config, Persistence::new(Arc::new(FileStore::new(path))))
}

/// A storage backend that fails every call.
#[derive(Debug, Default)]
pub struct OfflineStore;

impl KeyValueStore for OfflineStore {
    fn get(&self, _key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn set(&self, _key: &str, _value: serde_json::Value) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("offline".to_string()))
    }
}

/// State over a backend that is always unavailable.
#[must_use]
pub fn offline_state() -> AppState {
    AppState::new(instant_config(), Persistence::new(Arc::new(OfflineStore)))
}

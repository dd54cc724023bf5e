//! Key-value persistence for cart, session and preference state.
//!
//! # Keys
//!
//! - `cart` - Line items of the shopper's cart
//! - `user` - The cosmetic session, if signed in
//! - `preferences_<session id>` - Display preferences per session
//!
//! Backends implement [`KeyValueStore`] and may fail. Callers never see those
//! failures: [`Persistence`] logs them and reports a boolean or `None`, and
//! the storefront carries on with in-memory state.

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys.
pub mod keys {
    /// Key for the shopper's cart line items.
    pub const CART: &str = "cart";

    /// Key for the current cosmetic session.
    pub const USER: &str = "user";

    /// Key for a session's display preferences.
    #[must_use]
    pub fn preferences(session_id: &str) -> String {
        format!("preferences_{session_id}")
    }
}

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend cannot be used at all right now.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stored document is not valid JSON.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A synchronous JSON key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError>;

    /// Delete `key`. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Typed, failure-tolerant access to a [`KeyValueStore`].
///
/// Cheaply cloneable; clones share the same backend.
#[derive(Clone)]
pub struct Persistence {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Persistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Persistence").finish_non_exhaustive()
    }
}

impl Persistence {
    /// Wrap a storage backend.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persistence that lives only as long as the process.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Read and decode the value under `key`.
    ///
    /// Returns `None` when the key is missing, the backend fails, or the
    /// stored value does not decode as `T`. Failures are logged.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.store.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => return None,
            Err(e) => {
                warn!(key, error = %e, "Error reading from storage");
                return None;
            }
        };

        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key, error = %e, "Discarding malformed stored value");
                None
            }
        }
    }

    /// Encode and store `value` under `key`.
    ///
    /// Returns `false` (and logs) if the value could not be written; the
    /// caller keeps its in-memory state either way.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool {
        let encoded = match serde_json::to_value(value) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(key, error = %e, "Could not encode value for storage");
                return false;
            }
        };

        match self.store.set(key, encoded) {
            Ok(()) => {
                debug!(key, "Persisted");
                true
            }
            Err(e) => {
                warn!(key, error = %e, "Storage not available, keeping state in memory");
                false
            }
        }
    }

    /// Delete the value under `key`, logging any failure.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.store.remove(key) {
            warn!(key, error = %e, "Error clearing key from storage");
        }
    }
}

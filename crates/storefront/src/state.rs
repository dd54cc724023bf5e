//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::info;

use crate::cart::Cart;
use crate::catalog::{ProductCatalog, ProductListing};
use crate::config::StorefrontConfig;
use crate::events::EventBus;
use crate::models::Session;
use crate::operations::PendingOperations;
use crate::persistence::{Persistence, keys};

/// The shopper's mutable state. Guarded by one lock so mutations never
/// interleave.
#[derive(Debug)]
pub struct ShopState {
    pub listing: ProductListing,
    pub cart: Cart,
    pub session: Option<Session>,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and is the single handle every
/// service and route works through.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: ProductCatalog,
    persistence: Persistence,
    events: EventBus,
    operations: PendingOperations,
    shop: Mutex<ShopState>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.inner.config)
            .field("products", &self.inner.catalog.len())
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Create application state over the default catalog.
    ///
    /// The cart and session are restored from `persistence`.
    #[must_use]
    pub fn new(config: StorefrontConfig, persistence: Persistence) -> Self {
        Self::with_catalog(config, ProductCatalog::with_default_products(), persistence)
    }

    /// Create application state over a specific catalog.
    #[must_use]
    pub fn with_catalog(
        config: StorefrontConfig,
        catalog: ProductCatalog,
        persistence: Persistence,
    ) -> Self {
        let cart: Cart = persistence.get(keys::CART).unwrap_or_default();
        let session: Option<Session> = persistence.get(keys::USER);

        info!(
            products = catalog.len(),
            cart_items = cart.item_count(),
            signed_in = session.is_some(),
            "Restored storefront state"
        );

        let shop = ShopState {
            listing: ProductListing::new(config.page_size),
            cart,
            session,
        };

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                persistence,
                events: EventBus::default(),
                operations: PendingOperations::new(),
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &ProductCatalog {
        &self.inner.catalog
    }

    /// Get a reference to the persistence adapter.
    #[must_use]
    pub fn persistence(&self) -> &Persistence {
        &self.inner.persistence
    }

    /// Get a reference to the event bus.
    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.inner.events
    }

    /// Get a reference to the pending-operation registry.
    #[must_use]
    pub fn operations(&self) -> &PendingOperations {
        &self.inner.operations
    }

    /// Lock the shopper's state. Never hold the guard across a simulated
    /// delay.
    pub async fn shop(&self) -> MutexGuard<'_, ShopState> {
        self.inner.shop.lock().await
    }
}

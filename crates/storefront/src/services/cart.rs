//! Cart service.
//!
//! Wraps the pure [`Cart`] transitions with product lookup, write-through
//! persistence, events and shopper notifications.

use thiserror::Error;
use tracing::{debug, info, instrument};

use techstore_core::ProductId;

use crate::cart::{Cart, CartAnalytics, CartChange, CartSummary, OrderReceipt};
use crate::events::{Notification, StoreEvent};
use crate::operations::{OperationError, OperationKind};
use crate::persistence::keys;
use crate::state::AppState;

/// Errors from cart mutations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product id is not in the catalog.
    #[error("product {0} not found")]
    UnknownProduct(ProductId),
}

/// Errors from checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,

    /// Another checkout is still running.
    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Cart operations over the shared [`AppState`].
pub struct CartService<'a> {
    state: &'a AppState,
}

impl<'a> CartService<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// A snapshot of the cart.
    pub async fn cart(&self) -> Cart {
        self.state.shop().await.cart.clone()
    }

    pub async fn summary(&self) -> CartSummary {
        self.state.shop().await.cart.summary()
    }

    pub async fn analytics(&self) -> CartAnalytics {
        self.state.shop().await.cart.analytics()
    }

    /// Add `quantity` units of a catalog product.
    ///
    /// # Errors
    ///
    /// Returns `CartError::UnknownProduct` if the id is not in the catalog.
    #[instrument(skip(self))]
    pub async fn add(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<CartSummary, CartError> {
        let product = self
            .state
            .catalog()
            .product(product_id)
            .ok_or(CartError::UnknownProduct(product_id))?;

        let (change, summary) = self.apply(|cart| cart.add(product, quantity)).await;
        if change.is_change() {
            self.state.events().notify(Notification::success(
                "Added to Cart",
                format!("{} has been added to your cart", product.name),
            ));
        }
        Ok(summary)
    }

    /// Set a line's quantity; zero or less removes it.
    #[instrument(skip(self))]
    pub async fn set_quantity(&self, product_id: ProductId, quantity: i64) -> CartSummary {
        let (change, summary) = self
            .apply(|cart| cart.set_quantity(product_id, quantity))
            .await;
        self.notify_removed(&change);
        summary
    }

    /// Remove a line. Removing an absent product does nothing.
    #[instrument(skip(self))]
    pub async fn remove(&self, product_id: ProductId) -> CartSummary {
        let (change, summary) = self.apply(|cart| cart.remove(product_id)).await;
        self.notify_removed(&change);
        summary
    }

    /// Empty the cart.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> CartSummary {
        self.apply(Cart::clear).await.1
    }

    /// Place an order for everything in the cart.
    ///
    /// After the checkout delay the cart is emptied and a receipt returned.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to order, and
    /// `CheckoutError::Operation` if a checkout is already in progress.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Result<OrderReceipt, CheckoutError> {
        if self.state.shop().await.cart.is_empty() {
            return Err(self.empty_cart());
        }

        let ticket = self.state.operations().begin(OperationKind::Checkout)?;
        tokio::time::sleep(self.state.config().delays.checkout).await;

        let mut shop = self.state.shop().await;
        ticket.complete()?;

        // The cart may have been emptied while waiting.
        if shop.cart.is_empty() {
            drop(shop);
            return Err(self.empty_cart());
        }

        let receipt = OrderReceipt::for_cart(&shop.cart);
        shop.cart.clear();
        self.state.persistence().set(keys::CART, &shop.cart);
        let summary = shop.cart.summary();
        self.state
            .events()
            .publish(StoreEvent::CartUpdated { summary });
        drop(shop);

        info!(
            order_id = %receipt.order_id,
            item_count = receipt.item_count,
            total = %receipt.total,
            "Order placed"
        );
        self.state.events().notify(Notification::success(
            "Order Placed!",
            format!(
                "Your order of {} items ({}) has been placed successfully!",
                receipt.item_count, receipt.total
            ),
        ));
        Ok(receipt)
    }

    /// Run `transition` under the shop lock, persisting and publishing if it
    /// changed anything.
    async fn apply(
        &self,
        transition: impl FnOnce(&mut Cart) -> CartChange,
    ) -> (CartChange, CartSummary) {
        let mut shop = self.state.shop().await;
        let change = transition(&mut shop.cart);
        let summary = shop.cart.summary();

        if !change.is_change() {
            debug!("Cart unchanged");
            return (change, summary);
        }

        self.state.persistence().set(keys::CART, &shop.cart);
        debug!(
            item_count = summary.item_count,
            total = %summary.total,
            "Cart updated"
        );
        // Published under the lock so subscribers see updates in order.
        self.state.events().publish(StoreEvent::CartUpdated {
            summary: summary.clone(),
        });
        drop(shop);
        (change, summary)
    }

    fn notify_removed(&self, change: &CartChange) {
        if let CartChange::Removed { product } = change {
            self.state.events().notify(Notification::warning(
                "Removed from Cart",
                format!("{} has been removed from your cart", product.name),
            ));
        }
    }

    fn empty_cart(&self) -> CheckoutError {
        self.state.events().notify(Notification::warning(
            "Cart Empty",
            "Please add items to your cart before checkout",
        ));
        CheckoutError::EmptyCart
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::StorefrontConfig;
    use crate::events::NotificationLevel;
    use crate::persistence::Persistence;

    fn state() -> AppState {
        AppState::new(StorefrontConfig::default(), Persistence::in_memory())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_updates_publish_in_order() {
        let state = state();
        let mut rx = state.events().subscribe();

        let tasks: Vec<_> = (0..20)
            .map(|_| {
                let state = state.clone();
                tokio::spawn(async move {
                    CartService::new(&state)
                        .add(ProductId::new(1), 1)
                        .await
                        .unwrap();
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap();
        }

        let mut counts = Vec::new();
        while let Ok(event) = rx.try_recv() {
            if let StoreEvent::CartUpdated { summary } = event {
                counts.push(summary.item_count);
            }
        }
        assert_eq!(counts, (1..=20).collect::<Vec<u32>>());
    }

    #[tokio::test]
    async fn test_add_persists_and_notifies() {
        let state = state();
        let mut rx = state.events().subscribe();
        let cart = CartService::new(&state);

        let summary = cart.add(ProductId::new(3), 2).await.unwrap();
        assert_eq!(summary.item_count, 2);

        let stored: Cart = state.persistence().get(keys::CART).unwrap();
        assert_eq!(stored.item_count(), 2);

        assert!(matches!(
            rx.recv().await.unwrap(),
            StoreEvent::CartUpdated { .. }
        ));
        let StoreEvent::Notification(n) = rx.recv().await.unwrap() else {
            panic!("expected a notification");
        };
        assert_eq!(n.message, "AirPods Pro has been added to your cart");
    }

    #[tokio::test]
    async fn test_add_unknown_product() {
        let state = state();
        assert!(matches!(
            CartService::new(&state).add(ProductId::new(99), 1).await,
            Err(CartError::UnknownProduct(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_absent_is_silent() {
        let state = state();
        let mut rx = state.events().subscribe();
        CartService::new(&state).remove(ProductId::new(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_set_quantity_zero_warns() {
        let state = state();
        let cart = CartService::new(&state);
        cart.add(ProductId::new(1), 1).await.unwrap();

        let mut rx = state.events().subscribe();
        let summary = cart.set_quantity(ProductId::new(1), 0).await;
        assert_eq!(summary.item_count, 0);

        rx.recv().await.unwrap();
        let StoreEvent::Notification(n) = rx.recv().await.unwrap() else {
            panic!("expected a notification");
        };
        assert_eq!(n.level, NotificationLevel::Warning);
        assert_eq!(n.title, "Removed from Cart");
    }

    #[tokio::test(start_paused = true)]
    async fn test_checkout_empties_cart() {
        let state = state();
        let cart = CartService::new(&state);
        cart.add(ProductId::new(1), 2).await.unwrap();
        cart.add(ProductId::new(12), 1).await.unwrap();

        let receipt = cart.checkout().await.unwrap();
        assert_eq!(receipt.item_count, 3);
        assert_eq!(receipt.total.to_string(), "$2,177.00");
        assert_eq!(cart.summary().await.item_count, 0);

        let stored: Cart = state.persistence().get(keys::CART).unwrap();
        assert!(stored.is_empty());
    }

    #[tokio::test]
    async fn test_checkout_empty_cart() {
        let state = state();
        assert!(matches!(
            CartService::new(&state).checkout().await,
            Err(CheckoutError::EmptyCart)
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_checkout_is_rejected() {
        let state = state();
        let cart = CartService::new(&state);
        cart.add(ProductId::new(1), 1).await.unwrap();

        let (first, second) = tokio::join!(cart.checkout(), cart.checkout());
        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(CheckoutError::Operation(OperationError::Pending(
                OperationKind::Checkout
            )))
        ));
    }
}

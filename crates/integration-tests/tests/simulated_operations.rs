//! Pending-operation rules under the default simulated delays.
//!
//! Tests run on a paused clock so the delays elapse instantly and
//! deterministically.

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use techstore_core::ProductId;
use techstore_integration_tests::delayed_state;
use techstore_storefront::events::StoreEvent;
use techstore_storefront::operations::{OperationError, OperationKind};
use techstore_storefront::services::{
    AuthError, AuthService, CartService, CatalogService, CheckoutError, Credentials,
};

#[tokio::test(start_paused = true)]
async fn test_second_checkout_is_rejected_while_first_runs() {
    let state = delayed_state();
    let cart = CartService::new(&state);
    cart.add(ProductId::new(1), 1).await.unwrap();

    let (first, second) = tokio::join!(cart.checkout(), cart.checkout());

    let receipt = first.unwrap();
    assert_eq!(receipt.item_count, 1);
    assert!(matches!(
        second,
        Err(CheckoutError::Operation(OperationError::Pending(
            OperationKind::Checkout
        )))
    ));
    assert!(cart.cart().await.is_empty());
    assert!(!state.operations().is_pending(OperationKind::Checkout));
}

#[tokio::test(start_paused = true)]
async fn test_checkout_can_run_again_after_completing() {
    let state = delayed_state();
    let cart = CartService::new(&state);

    cart.add(ProductId::new(2), 1).await.unwrap();
    cart.checkout().await.unwrap();
    cart.add(ProductId::new(3), 1).await.unwrap();
    let receipt = cart.checkout().await.unwrap();

    assert_eq!(receipt.item_count, 1);
}

#[tokio::test(start_paused = true)]
async fn test_cart_emptied_during_checkout() {
    let state = delayed_state();
    let cart = CartService::new(&state);
    cart.add(ProductId::new(4), 1).await.unwrap();

    let (result, ()) = tokio::join!(cart.checkout(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        cart.clear().await;
    });

    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
}

#[tokio::test(start_paused = true)]
async fn test_second_load_more_is_rejected() {
    let state = delayed_state();
    let catalog = CatalogService::new(&state);

    let (first, second) = tokio::join!(catalog.load_more(), catalog.load_more());

    assert!(first.is_ok());
    assert_eq!(
        second.unwrap_err(),
        OperationError::Pending(OperationKind::LoadMore)
    );
}

#[tokio::test(start_paused = true)]
async fn test_newer_sign_in_supersedes_older() {
    let state = delayed_state();
    let auth = AuthService::new(&state);
    let mut events = state.events().subscribe();

    let first = Credentials::new("first@example.com", "secret");
    let second = Credentials::new("second@example.com", "secret");
    let (older, newer) = tokio::join!(auth.sign_in(&first), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        auth.sign_in(&second).await
    });

    assert!(matches!(
        older,
        Err(AuthError::Operation(OperationError::Superseded(
            OperationKind::SignIn
        )))
    ));
    assert_eq!(newer.unwrap().display_name, "second");
    assert_eq!(auth.current().await.unwrap().display_name, "second");

    // Only the newer sign-in announced a session.
    let mut sessions = Vec::new();
    while let Ok(event) = events.try_recv() {
        if let StoreEvent::SessionChanged { display_name } = event {
            sessions.push(display_name);
        }
    }
    assert_eq!(sessions, [Some("second".to_string())]);
}

#[tokio::test(start_paused = true)]
async fn test_operations_of_different_kinds_overlap() {
    let state = delayed_state();
    let cart = CartService::new(&state);
    let catalog = CatalogService::new(&state);
    cart.add(ProductId::new(5), 1).await.unwrap();

    let (checkout, load_more) = tokio::join!(cart.checkout(), catalog.load_more());

    assert!(checkout.is_ok());
    assert!(load_more.is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_logout_during_sign_in_stays_signed_out() {
    let state = delayed_state();
    let auth = AuthService::new(&state);

    let credentials = Credentials::new("sam@example.com", "secret");
    let (signed_in, _) = tokio::join!(auth.sign_in(&credentials), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        auth.sign_out().await
    });

    assert!(matches!(
        signed_in,
        Err(AuthError::Operation(OperationError::Superseded(
            OperationKind::SignIn
        )))
    ));
    assert!(auth.current().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_filter_change_during_load_more_keeps_page_one() {
    let state = techstore_storefront::state::AppState::new(
        techstore_storefront::config::StorefrontConfig {
            page_size: 2,
            ..techstore_storefront::config::StorefrontConfig::default()
        },
        techstore_storefront::persistence::Persistence::in_memory(),
    );
    let catalog = CatalogService::new(&state);

    let (loaded, _) = tokio::join!(catalog.load_more(), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        catalog
            .apply_filter(
                techstore_core::FilterState::default()
                    .with_category(techstore_core::Category::Laptops),
            )
            .await
    });

    assert_eq!(
        loaded.unwrap_err(),
        OperationError::Superseded(OperationKind::LoadMore)
    );
    let listing = catalog.listing().await;
    assert_eq!(listing.page, 1);
    assert_eq!(listing.products.len(), 2);
    assert_eq!(listing.total_matches, 3);
}

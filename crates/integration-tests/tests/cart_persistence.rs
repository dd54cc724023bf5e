//! Cart and session state surviving a restart, and degrading when storage
//! is unavailable.

#![allow(clippy::unwrap_used)]

use techstore_core::ProductId;
use techstore_integration_tests::{file_state, offline_state, temp_data_path};
use techstore_storefront::persistence::{FileStore, KeyValueStore, keys};
use techstore_storefront::services::{AuthService, CartService, Credentials};

#[tokio::test]
async fn test_cart_survives_restart() {
    let path = temp_data_path("cart-restart");

    {
        let state = file_state(&path);
        let cart = CartService::new(&state);
        cart.add(ProductId::new(1), 2).await.unwrap();
        cart.add(ProductId::new(3), 1).await.unwrap();
    }

    let state = file_state(&path);
    let cart = CartService::new(&state).cart().await;
    assert_eq!(cart.item_count(), 3);
    assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 2);
    assert_eq!(cart.total().display(), "$2,247.00");

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_session_survives_restart_until_logout() {
    let path = temp_data_path("session-restart");

    {
        let state = file_state(&path);
        AuthService::new(&state)
            .sign_in(&Credentials::new("sam@example.com", "secret"))
            .await
            .unwrap();
    }

    let state = file_state(&path);
    let session = AuthService::new(&state).current().await.unwrap();
    assert_eq!(session.display_name, "sam");
    assert!(AuthService::new(&state).sign_out().await);

    let state = file_state(&path);
    assert!(AuthService::new(&state).current().await.is_none());

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_checkout_clears_stored_cart() {
    let path = temp_data_path("checkout");

    {
        let state = file_state(&path);
        let cart = CartService::new(&state);
        cart.add(ProductId::new(5), 1).await.unwrap();
        cart.checkout().await.unwrap();
    }

    let stored = FileStore::new(&path).get(keys::CART).unwrap().unwrap();
    assert_eq!(stored, serde_json::json!([]));

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_corrupt_file_starts_empty() {
    let path = temp_data_path("corrupt");
    std::fs::write(&path, "{ not json").unwrap();

    let state = file_state(&path);
    assert!(CartService::new(&state).cart().await.is_empty());
    assert!(AuthService::new(&state).current().await.is_none());

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_malformed_cart_entry_is_discarded() {
    let path = temp_data_path("malformed");
    std::fs::write(&path, r#"{"cart": {"oops": true}, "user": 42}"#).unwrap();

    let state = file_state(&path);
    assert!(CartService::new(&state).cart().await.is_empty());
    assert!(AuthService::new(&state).current().await.is_none());

    std::fs::remove_file(&path).ok();
}

#[tokio::test]
async fn test_offline_storage_keeps_working_in_memory() {
    let state = offline_state();
    let cart = CartService::new(&state);

    let summary = cart.add(ProductId::new(2), 1).await.unwrap();
    assert_eq!(summary.item_count, 1);

    let session = AuthService::new(&state)
        .sign_in(&Credentials::new("jo@example.com", "secret"))
        .await
        .unwrap();
    assert_eq!(session.display_name, "jo");

    let receipt = cart.checkout().await.unwrap();
    assert_eq!(receipt.item_count, 1);
    assert!(cart.cart().await.is_empty());
}

//! Cart commands.

use tracing::info;

use techstore_core::ProductId;
use techstore_storefront::services::CartService;
use techstore_storefront::state::AppState;

/// Show every line and the total.
pub async fn show(state: &AppState) {
    let cart = CartService::new(state).cart().await;
    if cart.is_empty() {
        info!("Your cart is empty");
        return;
    }
    for item in cart.items() {
        info!(
            "#{:<3} {:<24} {} x {:>10} = {:>10}",
            item.product.id,
            item.product.name,
            item.quantity,
            item.product.price.display(),
            item.subtotal().display(),
        );
    }
    info!("{} items, total {}", cart.item_count(), cart.total());
}

/// Add a product.
///
/// # Errors
///
/// Returns an error if the product id is unknown.
pub async fn add(
    state: &AppState,
    id: ProductId,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let summary = CartService::new(state).add(id, quantity).await?;
    info!("Cart: {} items, {}", summary.item_count, summary.total);
    Ok(())
}

/// Set a line's quantity.
pub async fn set(state: &AppState, id: ProductId, quantity: i64) {
    let summary = CartService::new(state).set_quantity(id, quantity).await;
    info!("Cart: {} items, {}", summary.item_count, summary.total);
}

/// Remove a line.
pub async fn remove(state: &AppState, id: ProductId) {
    let summary = CartService::new(state).remove(id).await;
    info!("Cart: {} items, {}", summary.item_count, summary.total);
}

/// Empty the cart.
pub async fn clear(state: &AppState) {
    CartService::new(state).clear().await;
    info!("Cart cleared");
}

/// Place the order.
///
/// # Errors
///
/// Returns an error if the cart is empty.
pub async fn checkout(state: &AppState) -> Result<(), Box<dyn std::error::Error>> {
    let receipt = CartService::new(state).checkout().await?;
    info!("Order {} placed at {}", receipt.order_id, receipt.placed_at);
    Ok(())
}

/// Show aggregate figures.
pub async fn stats(state: &AppState) {
    let stats = CartService::new(state).analytics().await;
    let categories: Vec<&str> = stats.categories.iter().map(|c| c.as_str()).collect();
    info!("Items:              {}", stats.item_count);
    info!("Total value:        {}", stats.total_value);
    info!("Categories:         {}", categories.join(", "));
    info!("Average line price: {}", stats.average_item_price);
}

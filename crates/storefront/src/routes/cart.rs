//! Cart route handlers.
//!
//! Every mutation responds with the full cart so the client can redraw the
//! sidebar and the header badge from one payload.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use techstore_core::ProductId;

use crate::cart::{Cart, CartAnalytics, LineItem, OrderReceipt};
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::services::CartService;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    pub image: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            product_id: item.product.id,
            name: item.product.name.clone(),
            quantity: item.quantity,
            price: item.product.price.display(),
            line_price: item.subtotal().display(),
            image: filters::optimized_image_url(&item.product.image, 80),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub total: String,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            item_count: cart.item_count(),
            total: cart.total().display(),
        }
    }
}

/// Header badge data.
#[derive(Debug, Clone, Serialize)]
pub struct CountView {
    pub count: u32,
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Update quantity request. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Remove line request.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub product_id: ProductId,
}

async fn current(cart: &CartService<'_>) -> Json<CartView> {
    Json(CartView::from(&cart.cart().await))
}

/// Current cart contents.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    current(&CartService::new(&state)).await
}

/// Units in the cart.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CountView> {
    let summary = CartService::new(&state).summary().await;
    Json(CountView {
        count: summary.item_count,
    })
}

/// Aggregate cart figures.
#[instrument(skip(state))]
pub async fn analytics(State(state): State<AppState>) -> Json<CartAnalytics> {
    Json(CartService::new(&state).analytics().await)
}

/// Add a product.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<AddToCartForm>,
) -> Result<Json<CartView>> {
    let quantity = form.quantity.unwrap_or(1);
    let cart = CartService::new(&state);
    cart.add(form.product_id, quantity).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[
            ("product_id", form.product_id.to_string()),
            ("quantity", quantity.to_string()),
        ],
    );
    Ok(current(&cart).await)
}

/// Set a line's quantity.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(form): Json<UpdateCartForm>,
) -> Json<CartView> {
    let cart = CartService::new(&state);
    cart.set_quantity(form.product_id, form.quantity).await;
    current(&cart).await
}

/// Remove a line.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<RemoveFromCartForm>,
) -> Json<CartView> {
    let cart = CartService::new(&state);
    cart.remove(form.product_id).await;
    current(&cart).await
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let cart = CartService::new(&state);
    cart.clear().await;
    current(&cart).await
}

/// Place an order for the cart.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> Result<Json<OrderReceipt>> {
    let receipt = CartService::new(&state).checkout().await?;
    add_breadcrumb(
        "cart",
        "Order placed",
        &[("order_id", receipt.order_id.to_string())],
    );
    Ok(Json(receipt))
}

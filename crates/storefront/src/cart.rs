//! The shopping cart: line items keyed by product id.
//!
//! All operations here are pure state transitions. Persistence, events and
//! notifications are layered on top by [`crate::services::CartService`].

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use techstore_core::{Category, Price, Product, ProductId};
use uuid::Uuid;

/// A product in the cart with its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product: Product,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl LineItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// What a cart operation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was inserted.
    Added { product: Product, quantity: u32 },
    /// An existing line's quantity changed.
    QuantityChanged { product: Product, quantity: u32 },
    /// A line was deleted.
    Removed { product: Product },
    /// All lines were deleted.
    Cleared,
    /// Nothing happened.
    Unchanged,
}

impl CartChange {
    /// Whether the cart's contents differ from before.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// The shopper's cart.
///
/// Every line has quantity of at least one and product ids are unique.
/// Deserializing from a stored array enforces both: zero-quantity entries are
/// dropped and duplicate ids are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct Cart {
    items: Vec<LineItem>,
}

impl From<Vec<LineItem>> for Cart {
    fn from(stored: Vec<LineItem>) -> Self {
        let mut cart = Self::default();
        for item in stored.into_iter().filter(|item| item.quantity > 0) {
            match cart.line_mut(item.product.id) {
                Some(line) => line.quantity = line.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }
}

impl From<Cart> for Vec<LineItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// The line for `product_id`, if present.
    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut LineItem> {
        self.items
            .iter_mut()
            .find(|item| item.product.id == product_id)
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.product.id == product_id)
    }

    /// Add `quantity` of `product`, merging with an existing line.
    ///
    /// Adding zero does nothing.
    pub fn add(&mut self, product: &Product, quantity: u32) -> CartChange {
        if quantity == 0 {
            return CartChange::Unchanged;
        }

        if let Some(line) = self.line_mut(product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return CartChange::QuantityChanged {
                product: line.product.clone(),
                quantity: line.quantity,
            };
        }

        self.items.push(LineItem {
            product: product.clone(),
            quantity,
            added_at: Utc::now(),
        });
        CartChange::Added {
            product: product.clone(),
            quantity,
        }
    }

    /// Remove the line for `product_id`. Removing an absent id does nothing.
    pub fn remove(&mut self, product_id: ProductId) -> CartChange {
        match self.position(product_id) {
            Some(index) => CartChange::Removed {
                product: self.items.remove(index).product,
            },
            None => CartChange::Unchanged,
        }
    }

    /// Set the quantity for `product_id`.
    ///
    /// Zero or negative removes the line. Absent ids are left alone.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove(product_id);
        }

        let Some(line) = self.line_mut(product_id) else {
            return CartChange::Unchanged;
        };

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if line.quantity == quantity {
            return CartChange::Unchanged;
        }
        line.quantity = quantity;
        CartChange::QuantityChanged {
            product: line.product.clone(),
            quantity,
        }
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> CartChange {
        if self.items.is_empty() {
            return CartChange::Unchanged;
        }
        self.items.clear();
        CartChange::Cleared
    }

    /// Sum of every line's subtotal.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::subtotal).sum()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counts and total for badges and events.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary {
            item_count: self.item_count(),
            line_count: self.items.len(),
            total: self.total(),
        }
    }

    /// Aggregate figures about the cart's contents.
    #[must_use]
    pub fn analytics(&self) -> CartAnalytics {
        let total_value = self.total();
        let average_item_price = if self.items.is_empty() {
            Price::zero(total_value.currency_code)
        } else {
            let lines = Decimal::from(self.items.len());
            Price::new(
                (total_value.amount / lines).round_dp(2),
                total_value.currency_code,
            )
        };

        CartAnalytics {
            item_count: self.item_count(),
            total_value,
            categories: self
                .items
                .iter()
                .map(|item| item.product.category)
                .collect(),
            average_item_price,
        }
    }
}

/// Counts and total of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub item_count: u32,
    pub line_count: usize,
    pub total: Price,
}

/// Aggregate cart figures.
///
/// `average_item_price` is the total divided by the number of lines, not
/// units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartAnalytics {
    pub item_count: u32,
    pub total_value: Price,
    pub categories: BTreeSet<Category>,
    pub average_item_price: Price,
}

/// Confirmation of a placed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: Uuid,
    pub item_count: u32,
    pub total: Price,
    pub placed_at: DateTime<Utc>,
}

impl OrderReceipt {
    /// Receipt for the current contents of `cart`.
    #[must_use]
    pub fn for_cart(cart: &Cart) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            item_count: cart.item_count(),
            total: cart.total(),
            placed_at: Utc::now(),
        }
    }
}

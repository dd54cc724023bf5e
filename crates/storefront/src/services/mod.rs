//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Cosmetic sign-in, registration and preferences
//! - `cart` - Cart mutations and checkout
//! - `catalog` - Filtering and paging the product listing
//!
//! Each service borrows the [`AppState`](crate::state::AppState) and is
//! constructed per call site.

pub mod auth;
pub mod cart;
pub mod catalog;

pub use auth::{AuthError, AuthService, Credentials, Registration};
pub use cart::{CartError, CartService, CheckoutError};
pub use catalog::CatalogService;

//! Core types for TechStore.
//!
//! This module provides type-safe wrappers for the storefront's domain
//! concepts.

pub mod email;
pub mod filter;
pub mod id;
pub mod price;
pub mod product;

pub use email::{Email, EmailError};
pub use filter::{FilterState, ParseFilterError, PriceRange, SortKey};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use product::{Category, Product, Rating, RatingError};

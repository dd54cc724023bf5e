//! TechStore Core - Shared domain types.
//!
//! This crate provides the types used across all TechStore components:
//! - `storefront` - Catalog, cart and session services plus the HTTP surface
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure predicates - no I/O, no
//! persistence, no async runtime. This keeps it lightweight and allows it to
//! be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, products and filter state

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

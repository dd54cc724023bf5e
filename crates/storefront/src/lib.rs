//! TechStore storefront library.
//!
//! Catalog browsing, the shopping cart and the cosmetic session, plus the
//! JSON HTTP surface over them. The `techstore-storefront` binary serves it;
//! the `techstore` CLI drives the same services directly.
//!
//! # Modules
//!
//! - [`catalog`] - Product list, filtering and pagination
//! - [`cart`] - Cart state transitions
//! - [`services`] - Catalog, cart and auth services over [`state::AppState`]
//! - [`persistence`] - Key-value storage for cart, session and preferences
//! - [`events`] - State-change events and shopper notifications
//! - [`operations`] - Guards for simulated delayed operations
//! - [`routes`] - HTTP handlers

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod events;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod operations;
pub mod persistence;
pub mod routes;
pub mod services;
pub mod state;

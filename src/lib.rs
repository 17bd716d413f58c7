//! Stationery Store Library
//!
//! Catalog query engine, cart aggregate, checkout orchestration and a mock
//! storefront API for a Vietnamese office-supplies shop.

// Domain modules
pub mod auth;
pub mod cart;
pub mod catalog;
pub mod client;

// Infrastructure
pub mod config;
pub mod error;
pub mod router;
pub mod state;

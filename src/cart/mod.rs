//! Shopping Cart Domain Module
//!
//! This module contains all shopping cart business logic, including:
//! - The cart aggregate (CartItem, Cart and its recomputed totals)
//! - Domain models (checkout results, shipping methods, inputs)
//! - Business logic helpers (shipping cost, stock validation, promo codes)
//! - REST API handlers

pub mod aggregate;
pub mod handlers;
pub mod helpers;
pub mod models;

// Re-export commonly used types for convenience
pub use aggregate::{Cart, CartItem};
pub use handlers::routes;
pub use models::{ShippingMethod, UnavailableItem};

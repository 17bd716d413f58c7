//! Product Catalog Domain Module
//!
//! This module contains everything about browsing products:
//! - Domain models (Product, Review, Category, query and envelope types)
//! - Product derivations (effective price, discount, price formatting)
//! - The filter/sort/paginate query engine
//! - The seeded mock catalog
//! - REST API handlers

pub mod fixtures;
pub mod handlers;
pub mod helpers;
pub mod models;
pub mod query;

// Re-export commonly used types for convenience
pub use handlers::routes;
pub use models::{Category, Product, ProductPage, ProductQuery, Review, SortKey, SortOrder};
pub use query::Catalog;

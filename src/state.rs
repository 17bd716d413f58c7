//! Application State Management
//!
//! The mock backend's process-local data: the generated catalog and one
//! cart per cart session. Nothing is persisted across restarts.

use crate::cart::aggregate::Cart;
use crate::catalog::fixtures::{generate_products, FixtureOptions};
use crate::catalog::query::Catalog;
use crate::config::Config;
use crate::error::Result;
use dashmap::DashMap;
use std::sync::Arc;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Core application state containing the catalog and the carts
pub struct AppState {
    /// Read-only product catalog.
    pub catalog: Catalog,

    /// In-memory storage for carts, keyed by cart session id.
    /// DashMap allows concurrent access without external Mutexes.
    pub carts: DashMap<String, Cart>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_catalog(Catalog::default())
    }
}

impl AppState {
    /// Creates a state around an existing catalog with no carts
    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            catalog,
            carts: DashMap::new(),
        }
    }

    /// Generates the seeded mock catalog described by `config`
    pub fn from_config(config: &Config) -> Result<Self> {
        let products = generate_products(&FixtureOptions {
            seed: config.catalog_seed,
            count: config.catalog_size,
            ..FixtureOptions::default()
        });
        let catalog = Catalog::new(products)?;

        tracing::info!(
            products = catalog.len(),
            seed = config.catalog_seed,
            "generated mock catalog"
        );

        Ok(Self::with_catalog(catalog))
    }

    /// Returns a copy of the session's cart, or an empty cart
    pub fn cart_snapshot(&self, session_id: &str) -> Cart {
        self.carts
            .get(session_id)
            .map(|cart| cart.clone())
            .unwrap_or_default()
    }

    /// Runs `f` against the session's cart, creating it when missing
    pub fn with_cart<T>(&self, session_id: &str, f: impl FnOnce(&mut Cart) -> T) -> T {
        let mut cart = self.carts.entry(session_id.to_string()).or_default();
        f(&mut cart)
    }
}

//! Application configuration loaded from environment variables.

use crate::catalog::fixtures::{DEFAULT_CATALOG_SIZE, DEFAULT_SEED};

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: `3001`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `CATALOG_SEED`: seed of the mock catalog generator (default: `42`)
/// - `CATALOG_SIZE`: number of mock products (default: `20`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub catalog_seed: u64,
    pub catalog_size: usize,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            catalog_seed: lookup("CATALOG_SEED")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.catalog_seed),
            catalog_size: lookup("CATALOG_SIZE")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.catalog_size),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            log_level: "info".to_string(),
            catalog_seed: DEFAULT_SEED,
            catalog_size: DEFAULT_CATALOG_SIZE,
        }
    }
}

//! Error types shared by the storefront core and its HTTP surface.
//!
//! Two layers exist:
//! - [`ApiError`] is what the data collaborator (the mock API) reports.
//! - [`StoreError`] is what the orchestration layer hands to callers. Every
//!   collaborator failure is converted before it leaves [`crate::client`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::cart::models::UnavailableItem;

/// Failures reported by the data collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("Product not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// The request itself was rejected as malformed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Anything the transport or the remote side failed with.
    #[error("Transport error: {0}")]
    Transport(String),
}

/// Business-rule failures raised by the storefront core.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Empty or malformed user input.
    #[error("{0}")]
    Validation(String),

    #[error("Product not found")]
    ProductNotFound(String),

    /// Rejected login. Over HTTP the body reads `Invalid credentials`.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The collaborator rejected the session token. The session has been cleared.
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,

    #[error("Your cart is empty. Please add items before checkout.")]
    EmptyCart,

    /// Checkout-time stock validation failed for one or more lines.
    #[error("Some items in your cart are no longer available in the requested quantity.")]
    UnavailableStock(Vec<UnavailableItem>),

    #[error("This product is out of stock.")]
    OutOfStock { product_id: String },

    #[error("Only {available} items available.")]
    InsufficientStock {
        product_id: String,
        requested: u32,
        available: u32,
    },

    #[error("Invalid promo code: {0}")]
    InvalidPromoCode(String),

    /// Network or otherwise unexpected failure. The original error stays
    /// reachable through `source()` for diagnostics.
    #[error("Failed to {operation}. Please try again later.")]
    Unexpected {
        operation: &'static str,
        #[source]
        source: ApiError,
    },
}

impl StoreError {
    /// Converts a collaborator failure into the core taxonomy.
    ///
    /// `operation` names the user-facing action for the generic message.
    pub fn from_api(operation: &'static str, err: ApiError) -> Self {
        match err {
            ApiError::NotFound(id) => StoreError::ProductNotFound(id),
            ApiError::InvalidCredentials => StoreError::InvalidCredentials,
            ApiError::Unauthorized => StoreError::Unauthorized,
            ApiError::InvalidPromoCode(code) => StoreError::InvalidPromoCode(code),
            ApiError::BadRequest(msg) => StoreError::Validation(msg),
            other @ ApiError::Transport(_) => StoreError::Unexpected {
                operation,
                source: other,
            },
        }
    }

    /// HTTP status used when this error crosses the REST boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            StoreError::Validation(_)
            | StoreError::InvalidPromoCode(_)
            | StoreError::EmptyCart => StatusCode::BAD_REQUEST,
            StoreError::InvalidCredentials | StoreError::Unauthorized => StatusCode::UNAUTHORIZED,
            StoreError::ProductNotFound(_) => StatusCode::NOT_FOUND,
            StoreError::UnavailableStock(_)
            | StoreError::OutOfStock { .. }
            | StoreError::InsufficientStock { .. } => StatusCode::CONFLICT,
            StoreError::Unexpected { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            StoreError::UnavailableStock(items) => json!({
                "message": self.to_string(),
                "unavailableItems": items,
            }),
            StoreError::InvalidCredentials => json!({ "message": "Invalid credentials" }),
            StoreError::Unexpected { operation, source } => {
                tracing::error!(%operation, error = %source, "unexpected failure");
                json!({ "message": self.to_string() })
            }
            _ => json!({ "message": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, StoreError>;

//! Shopping Cart Domain Models
//!
//! Request/response shapes of the cart endpoints and the value types used
//! by checkout.

use super::aggregate::Cart;
use serde::{Deserialize, Serialize};

// =============================================================================
// Checkout Models
// =============================================================================

/// A cart line whose requested quantity exceeds current stock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableItem {
    pub item_id: String,
    pub product_id: String,
    pub name: String,
    pub requested_quantity: u32,
    pub available_quantity: u32,
}

/// Delivery options offered at checkout.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Standard,
    Express,
    Sameday,
}

impl ShippingMethod {
    /// Unknown names fall back to `Standard`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "express" => ShippingMethod::Express,
            "sameday" => ShippingMethod::Sameday,
            _ => ShippingMethod::Standard,
        }
    }

    /// Flat fee in đồng when the order does not qualify for free shipping.
    pub fn fee(&self) -> i64 {
        match self {
            ShippingMethod::Standard => 30_000,
            ShippingMethod::Express => 50_000,
            ShippingMethod::Sameday => 100_000,
        }
    }
}

// =============================================================================
// Request Models
// =============================================================================

fn default_quantity() -> u32 {
    1
}

/// Body of `POST /cart/items`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemInput {
    pub product_id: String,

    /// Quantity to add (defaults to 1)
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

/// Body of `PUT /cart/items/:id`
#[derive(Debug, Deserialize)]
pub struct UpdateQuantityInput {
    /// Zero or negative removes the line.
    pub quantity: i64,
}

/// Body of `POST /cart/promo`
#[derive(Debug, Deserialize)]
pub struct PromoInput {
    pub code: String,
}

/// Query of `GET /cart/shipping`
#[derive(Debug, Default, Deserialize)]
pub struct ShippingParams {
    pub method: Option<String>,
}

// =============================================================================
// Response Models
// =============================================================================

/// Successful checkout validation: the cart, unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutValidation {
    pub valid: bool,
    pub cart: Cart,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    pub method: ShippingMethod,
    pub subtotal: i64,
    pub cost: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shipping_method_parsing_defaults_to_standard() {
        assert_eq!(ShippingMethod::parse("express"), ShippingMethod::Express);
        assert_eq!(ShippingMethod::parse(" SameDay "), ShippingMethod::Sameday);
        assert_eq!(ShippingMethod::parse("standard"), ShippingMethod::Standard);
        assert_eq!(ShippingMethod::parse("drone"), ShippingMethod::Standard);
        assert_eq!(ShippingMethod::parse(""), ShippingMethod::Standard);
    }

    #[test]
    fn add_item_quantity_defaults_to_one() {
        let input: AddItemInput = serde_json::from_str(r#"{"productId":"product-2"}"#).unwrap();
        assert_eq!(input.quantity, 1);
    }
}

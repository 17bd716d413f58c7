//! Shopping Cart Business Logic Helpers
//!
//! Shipping, stock validation, promo codes and cart-session plumbing.

use super::aggregate::{Cart, CartItem};
use super::models::{ShippingMethod, UnavailableItem};
use crate::error::{Result, StoreError};
use axum::http::{header, HeaderMap, HeaderValue};
use uuid::Uuid;

// =============================================================================
// Shipping
// =============================================================================

/// Orders at or above this subtotal ship for free.
pub const FREE_SHIPPING_THRESHOLD: i64 = 500_000;

pub fn calculate_shipping_cost(subtotal: i64, method: ShippingMethod) -> i64 {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        0
    } else {
        method.fee()
    }
}

// =============================================================================
// Stock Validation
// =============================================================================

/// Describes `item` as unavailable when `available` cannot cover it.
pub fn stock_shortfall(item: &CartItem, available: u32) -> Option<UnavailableItem> {
    (available < item.quantity).then(|| UnavailableItem {
        item_id: item.id.clone(),
        product_id: item.product_id.clone(),
        name: item.name.clone(),
        requested_quantity: item.quantity,
        available_quantity: available,
    })
}

/// Checks every line against the stock reported by `available_for`.
///
/// Fails with [`StoreError::EmptyCart`] for an empty cart and with
/// [`StoreError::UnavailableStock`] listing every short line. Lookup
/// failures are propagated as they are.
pub fn validate_stock<F>(cart: &Cart, mut available_for: F) -> Result<()>
where
    F: FnMut(&CartItem) -> Result<u32>,
{
    if cart.is_empty() {
        return Err(StoreError::EmptyCart);
    }

    let mut unavailable = Vec::new();
    for item in cart.items() {
        let available = available_for(item)?;
        unavailable.extend(stock_shortfall(item, available));
    }

    if unavailable.is_empty() {
        Ok(())
    } else {
        Err(StoreError::UnavailableStock(unavailable))
    }
}

// =============================================================================
// Promo Codes
// =============================================================================

/// How a promo code reduces the subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromoRule {
    /// Fixed amount of đồng.
    Fixed(i64),
    /// Percentage of the subtotal, rounded down.
    Percent(u8),
}

impl PromoRule {
    pub fn discount_for(&self, subtotal: i64) -> i64 {
        match *self {
            PromoRule::Fixed(amount) => amount,
            PromoRule::Percent(pct) => subtotal.max(0) * i64::from(pct) / 100,
        }
    }
}

/// The demo promo codes.
pub const PROMO_CODES: [(&str, PromoRule); 2] = [
    ("WELCOME", PromoRule::Fixed(6_000)),
    ("GIAM10", PromoRule::Percent(10)),
];

/// Looks a code up, ignoring case and surrounding whitespace.
pub fn find_promo(code: &str) -> Option<PromoRule> {
    let code = code.trim();
    PROMO_CODES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, rule)| *rule)
}

// =============================================================================
// Sessions and Formatting
// =============================================================================

pub const CART_SESSION_COOKIE: &str = "cart_session";

/// Returns the `cart_session` cookie value, or a new UUID when absent.
///
/// The flag is `true` when the id was just created and must be sent back.
pub fn resolve_session_id(headers: &HeaderMap) -> (String, bool) {
    let existing = headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == CART_SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string());

    match existing {
        Some(id) => (id, false),
        None => (Uuid::new_v4().simple().to_string(), true),
    }
}

/// `Set-Cookie` value binding the client to `session_id`.
pub fn session_cookie(session_id: &str) -> Option<HeaderValue> {
    HeaderValue::from_str(&format!(
        "{CART_SESSION_COOKIE}={session_id}; Path=/; HttpOnly"
    ))
    .ok()
}

/// Produces a human-readable one-line summary for a list of cart items.
///
/// Example output: `"2x Bút bi, 1x Giấy A4"`.
pub fn format_item_summary(items: &[CartItem]) -> String {
    items
        .iter()
        .map(|i| format!("{}x {}", i.quantity, i.name))
        .collect::<Vec<_>>()
        .join(", ")
}

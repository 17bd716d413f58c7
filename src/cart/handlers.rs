//! REST API handlers for shopping cart operations
//!
//! Every endpoint works on the cart bound to the caller's `cart_session`
//! cookie. A first request without the cookie gets a new session.

use super::{aggregate::Cart, helpers::*, models::*};
use crate::catalog::models::DataResponse;
use crate::error::StoreError;
use crate::state::SharedState;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;

/// Creates routes for cart-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/cart", get(get_cart).delete(clear_cart))
        .route("/cart/items", post(add_item))
        .route("/cart/items/:id", put(update_item).delete(remove_item))
        .route("/cart/promo", post(apply_promo))
        .route("/cart/checkout", post(checkout))
        .route("/cart/shipping", get(shipping_quote))
}

/// Wraps `data` in the `{ data }` envelope and sets the session cookie for
/// new sessions.
fn respond<T: Serialize>(session_id: &str, is_new_session: bool, data: T) -> Response {
    let mut response = Json(DataResponse { data }).into_response();

    if is_new_session {
        if let Some(cookie) = session_cookie(session_id) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }

    response
}

/// Endpoint: GET /cart
async fn get_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart = state.cart_snapshot(&session_id);
    respond(&session_id, is_new_session, cart)
}

/// Endpoint: DELETE /cart
async fn clear_cart(State(state): State<SharedState>, headers: HeaderMap) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart = state.with_cart(&session_id, |cart| cart.clear().clone());
    respond(&session_id, is_new_session, cart)
}

/// Endpoint: POST /cart/items
/// Stock is not checked here; checkout validation does that.
async fn add_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<AddItemInput>,
) -> Result<Response, StoreError> {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let product = state
        .catalog
        .get(&payload.product_id)
        .ok_or_else(|| StoreError::ProductNotFound(payload.product_id.clone()))?;

    let cart = state.with_cart(&session_id, |cart| {
        cart.add_item(product, payload.quantity).map(Cart::clone)
    })?;

    tracing::debug!(%session_id, product_id = %product.id, quantity = payload.quantity, "item added");
    Ok(respond(&session_id, is_new_session, cart))
}

/// Endpoint: PUT /cart/items/:id
async fn update_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
    Json(payload): Json<UpdateQuantityInput>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart = state.with_cart(&session_id, |cart| {
        cart.update_item_quantity(&item_id, payload.quantity).clone()
    });
    respond(&session_id, is_new_session, cart)
}

/// Endpoint: DELETE /cart/items/:id
/// Removing an unknown line is not an error.
async fn remove_item(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Path(item_id): Path<String>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart = state.with_cart(&session_id, |cart| cart.remove_item(&item_id).clone());
    respond(&session_id, is_new_session, cart)
}

/// Endpoint: POST /cart/promo
async fn apply_promo(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Json(payload): Json<PromoInput>,
) -> Result<Response, StoreError> {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    if payload.code.trim().is_empty() {
        return Err(StoreError::Validation(
            "Please enter a valid promo code.".to_string(),
        ));
    }

    let rule = find_promo(&payload.code)
        .ok_or_else(|| StoreError::InvalidPromoCode(payload.code.trim().to_string()))?;
    let cart = state.with_cart(&session_id, |cart| {
        let amount = rule.discount_for(cart.subtotal());
        cart.apply_discount(amount).clone()
    });

    Ok(respond(&session_id, is_new_session, cart))
}

/// Endpoint: POST /cart/checkout
/// Validates every line against current catalog stock. The cart is left
/// untouched either way.
async fn checkout(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Response, StoreError> {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let cart = state.cart_snapshot(&session_id);

    validate_stock(&cart, |item| {
        state
            .catalog
            .get(&item.product_id)
            .map(|p| p.stock)
            .ok_or_else(|| StoreError::ProductNotFound(item.product_id.clone()))
    })?;

    tracing::info!(
        %session_id,
        items = %format_item_summary(cart.items()),
        total = cart.total(),
        "checkout validated"
    );

    Ok(respond(
        &session_id,
        is_new_session,
        CheckoutValidation { valid: true, cart },
    ))
}

/// Endpoint: GET /cart/shipping?method=
async fn shipping_quote(
    State(state): State<SharedState>,
    headers: HeaderMap,
    Query(params): Query<ShippingParams>,
) -> Response {
    let (session_id, is_new_session) = resolve_session_id(&headers);
    let method = params
        .method
        .as_deref()
        .map(ShippingMethod::parse)
        .unwrap_or_default();
    let subtotal = state.cart_snapshot(&session_id).subtotal();

    respond(
        &session_id,
        is_new_session,
        ShippingQuote {
            method,
            subtotal,
            cost: calculate_shipping_cost(subtotal, method),
        },
    )
}

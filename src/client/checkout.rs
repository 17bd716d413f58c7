//! Cart and checkout orchestration.

use super::api::StoreApi;
use super::storefront::{convert, Storefront};
use crate::auth::session::Session;
use crate::cart::aggregate::Cart;
use crate::cart::helpers::{calculate_shipping_cost, validate_stock};
use crate::cart::models::{CheckoutValidation, ShippingMethod};
use crate::error::{Result, StoreError};
use futures_util::future::join_all;
use std::collections::HashMap;

impl<A: StoreApi> Storefront<A> {
    pub async fn get_cart(&self, session: &mut Session) -> Result<Cart> {
        let token = session.token().map(str::to_owned);
        let result = self.api.get_cart(token.as_deref()).await;
        self.settle(session, "fetch cart", result)
    }

    /// Adds `quantity` of a product after checking it against current stock.
    pub async fn add_to_cart(
        &self,
        session: &mut Session,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart> {
        if quantity == 0 {
            return Err(StoreError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let product = self.get_product_by_id(product_id).await?;
        if product.stock == 0 {
            return Err(StoreError::OutOfStock {
                product_id: product.id,
            });
        }
        if product.stock < quantity {
            return Err(StoreError::InsufficientStock {
                product_id: product.id,
                requested: quantity,
                available: product.stock,
            });
        }

        let token = session.token().map(str::to_owned);
        let result = self
            .api
            .add_to_cart(token.as_deref(), &product.id, quantity)
            .await;
        let cart = self.settle(session, "add item to cart", result)?;

        tracing::debug!(product_id = %product.id, quantity, "added to cart");
        Ok(cart)
    }

    /// Sets a line's quantity. Zero or less removes the line.
    pub async fn update_cart_item(
        &self,
        session: &mut Session,
        item_id: &str,
        quantity: i64,
    ) -> Result<Cart> {
        if quantity <= 0 {
            return self.remove_cart_item(session, item_id).await;
        }

        let token = session.token().map(str::to_owned);
        let result = self
            .api
            .update_cart_item(token.as_deref(), item_id, quantity)
            .await;
        self.settle(session, "update cart item", result)
    }

    pub async fn remove_cart_item(&self, session: &mut Session, item_id: &str) -> Result<Cart> {
        let token = session.token().map(str::to_owned);
        let result = self.api.remove_cart_item(token.as_deref(), item_id).await;
        self.settle(session, "remove cart item", result)
    }

    pub async fn clear_cart(&self, session: &mut Session) -> Result<Cart> {
        let token = session.token().map(str::to_owned);
        let result = self.api.clear_cart(token.as_deref()).await;
        self.settle(session, "clear cart", result)
    }

    /// Rejects blank codes locally; the collaborator decides everything else.
    pub async fn apply_promo_code(&self, session: &mut Session, code: &str) -> Result<Cart> {
        let code = code.trim();
        if code.is_empty() {
            return Err(StoreError::Validation(
                "Please enter a valid promo code.".to_string(),
            ));
        }

        let token = session.token().map(str::to_owned);
        let result = self.api.apply_promo_code(token.as_deref(), code).await;
        self.settle(session, "apply promo code", result)
    }

    /// Shipping cost for `subtotal`. Unknown methods are priced as standard.
    pub fn calculate_shipping_cost(&self, subtotal: i64, method: &str) -> i64 {
        calculate_shipping_cost(subtotal, ShippingMethod::parse(method))
    }

    /// Re-fetches every product in the cart and checks its stock.
    ///
    /// Fails with [`StoreError::EmptyCart`] or with
    /// [`StoreError::UnavailableStock`] listing each short line. On success
    /// the cart is returned unchanged.
    pub async fn validate_cart_for_checkout(
        &self,
        session: &mut Session,
    ) -> Result<CheckoutValidation> {
        let cart = self.get_cart(session).await?;

        let lookups = join_all(
            cart.items()
                .iter()
                .map(|item| self.api.get_product_by_id(&item.product_id)),
        )
        .await;

        let stock: HashMap<&str, u32> = cart
            .items()
            .iter()
            .zip(lookups)
            .map(|(item, found)| {
                found
                    .map(|product| (item.id.as_str(), product.stock))
                    .map_err(|e| convert("validate cart", e))
            })
            .collect::<Result<_>>()?;

        validate_stock(&cart, |item| {
            stock
                .get(item.id.as_str())
                .copied()
                .ok_or_else(|| StoreError::ProductNotFound(item.product_id.clone()))
        })?;

        Ok(CheckoutValidation { valid: true, cart })
    }
}

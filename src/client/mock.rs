//! In-process mock backend.
//!
//! Serves the generated catalog through the query engine and keeps a single
//! cart in memory. Each call sleeps for the configured latency first.

use super::api::StoreApi;
use crate::auth::helpers::check_demo_credentials;
use crate::auth::models::{AuthUser, Credentials, DEMO_TOKEN};
use crate::cart::aggregate::Cart;
use crate::cart::helpers::find_promo;
use crate::catalog::models::{Product, ProductPage, ProductQuery};
use crate::catalog::query::Catalog;
use crate::error::ApiError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Latency applied when none is configured.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(300);

pub struct MockStoreApi {
    catalog: Arc<Catalog>,
    cart: Mutex<Cart>,
    latency: Duration,
    tokens_expired: AtomicBool,
    fail_next: Mutex<Option<ApiError>>,
}

impl MockStoreApi {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            cart: Mutex::new(Cart::new()),
            latency: DEFAULT_LATENCY,
            tokens_expired: AtomicBool::new(false),
            fail_next: Mutex::new(None),
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Starts from an existing cart instead of an empty one.
    pub fn with_cart(mut self, cart: Cart) -> Self {
        self.cart = Mutex::new(cart);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Makes every token unknown from now on, as if sessions expired.
    pub fn expire_tokens(&self) {
        self.tokens_expired.store(true, Ordering::SeqCst);
    }

    /// Fails the next call with `err`, whatever it is.
    pub async fn fail_next_call(&self, err: ApiError) {
        *self.fail_next.lock().await = Some(err);
    }

    /// Applies latency and any injected failure. Every call starts here.
    async fn begin(&self) -> Result<(), ApiError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self.fail_next.lock().await.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn authorize(&self, token: Option<&str>) -> Result<(), ApiError> {
        match token {
            None => Ok(()),
            Some(t) if t == DEMO_TOKEN && !self.tokens_expired.load(Ordering::SeqCst) => Ok(()),
            Some(_) => Err(ApiError::Unauthorized),
        }
    }

    fn product(&self, id: &str) -> Result<&Product, ApiError> {
        self.catalog
            .get(id)
            .ok_or_else(|| ApiError::NotFound(id.to_string()))
    }
}

#[async_trait]
impl StoreApi for MockStoreApi {
    async fn get_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError> {
        self.begin().await?;
        Ok(self.catalog.query(query))
    }

    async fn get_product_by_id(&self, id: &str) -> Result<Product, ApiError> {
        self.begin().await?;
        self.product(id).cloned()
    }

    async fn login(&self, credentials: &Credentials) -> Result<AuthUser, ApiError> {
        self.begin().await?;
        check_demo_credentials(credentials).ok_or(ApiError::InvalidCredentials)
    }

    async fn current_user(&self, token: &str) -> Result<AuthUser, ApiError> {
        self.begin().await?;
        self.authorize(Some(token))?;
        Ok(AuthUser::demo())
    }

    async fn get_cart(&self, token: Option<&str>) -> Result<Cart, ApiError> {
        self.begin().await?;
        self.authorize(token)?;
        Ok(self.cart.lock().await.clone())
    }

    async fn add_to_cart(
        &self,
        token: Option<&str>,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        self.begin().await?;
        self.authorize(token)?;
        let product = self.product(product_id)?;

        let mut cart = self.cart.lock().await;
        cart.add_item(product, quantity)
            .map(Cart::clone)
            .map_err(|e| ApiError::BadRequest(e.to_string()))
    }

    async fn update_cart_item(
        &self,
        token: Option<&str>,
        item_id: &str,
        quantity: i64,
    ) -> Result<Cart, ApiError> {
        self.begin().await?;
        self.authorize(token)?;
        Ok(self.cart.lock().await.update_item_quantity(item_id, quantity).clone())
    }

    async fn remove_cart_item(
        &self,
        token: Option<&str>,
        item_id: &str,
    ) -> Result<Cart, ApiError> {
        self.begin().await?;
        self.authorize(token)?;
        Ok(self.cart.lock().await.remove_item(item_id).clone())
    }

    async fn clear_cart(&self, token: Option<&str>) -> Result<Cart, ApiError> {
        self.begin().await?;
        self.authorize(token)?;
        Ok(self.cart.lock().await.clear().clone())
    }

    async fn apply_promo_code(&self, token: Option<&str>, code: &str) -> Result<Cart, ApiError> {
        self.begin().await?;
        self.authorize(token)?;
        let rule = find_promo(code).ok_or_else(|| ApiError::InvalidPromoCode(code.to_string()))?;

        let mut cart = self.cart.lock().await;
        let amount = rule.discount_for(cart.subtotal());
        Ok(cart.apply_discount(amount).clone())
    }
}

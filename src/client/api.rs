//! Data collaborator contract.
//!
//! The storefront core talks to its backend only through [`StoreApi`].
//! Every call is asynchronous and may fail with an [`ApiError`]; there is
//! no retry, and a failure is final for that attempt.

use crate::auth::models::{AuthUser, Credentials};
use crate::cart::aggregate::Cart;
use crate::catalog::models::{Product, ProductPage, ProductQuery};
use crate::error::ApiError;
use async_trait::async_trait;

/// Backend operations consumed by [`Storefront`](super::Storefront).
///
/// Cart calls carry the session token when the user is signed in. An
/// anonymous call passes `None`; an unknown or expired token is answered
/// with [`ApiError::Unauthorized`].
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Lists products in the `{ data, meta }` envelope.
    async fn get_products(&self, query: &ProductQuery) -> Result<ProductPage, ApiError>;

    async fn get_product_by_id(&self, id: &str) -> Result<Product, ApiError>;

    async fn login(&self, credentials: &Credentials) -> Result<AuthUser, ApiError>;

    /// Resolves the user a token belongs to.
    async fn current_user(&self, token: &str) -> Result<AuthUser, ApiError>;

    async fn get_cart(&self, token: Option<&str>) -> Result<Cart, ApiError>;

    async fn add_to_cart(
        &self,
        token: Option<&str>,
        product_id: &str,
        quantity: u32,
    ) -> Result<Cart, ApiError>;

    async fn update_cart_item(
        &self,
        token: Option<&str>,
        item_id: &str,
        quantity: i64,
    ) -> Result<Cart, ApiError>;

    async fn remove_cart_item(&self, token: Option<&str>, item_id: &str)
        -> Result<Cart, ApiError>;

    async fn clear_cart(&self, token: Option<&str>) -> Result<Cart, ApiError>;

    /// Decides whether `code` is valid and how much it takes off.
    async fn apply_promo_code(&self, token: Option<&str>, code: &str) -> Result<Cart, ApiError>;
}

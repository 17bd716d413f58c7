//! Storefront orchestration: catalog browsing and authentication.
//!
//! [`Storefront`] is the only thing the presentation layer talks to. It
//! calls the [`StoreApi`] collaborator, converts every [`ApiError`] into a
//! [`StoreError`], and applies the forced logout on `Unauthorized`.
//! Cart and checkout operations live in [`super::checkout`].

use super::api::StoreApi;
use super::sequencer::RequestSequencer;
use crate::auth::helpers::validate_login;
use crate::auth::models::{AuthUser, Credentials};
use crate::auth::session::Session;
use crate::catalog::models::{Product, ProductPage, ProductQuery, SortOrder};
use crate::error::{ApiError, Result, StoreError};

pub const DEFAULT_SHOWCASE_LIMIT: u32 = 8;
pub const DEFAULT_RELATED_LIMIT: u32 = 4;

pub struct Storefront<A> {
    pub(super) api: A,
    browse_sequence: RequestSequencer,
}

impl<A: StoreApi> Storefront<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            browse_sequence: RequestSequencer::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    pub async fn get_products(&self, query: &ProductQuery) -> Result<ProductPage> {
        self.api
            .get_products(query)
            .await
            .map_err(|e| convert("fetch products", e))
    }

    /// Like [`get_products`](Self::get_products), but yields `None` when a
    /// newer browse started before this one finished.
    pub async fn browse_products(&self, query: &ProductQuery) -> Result<Option<ProductPage>> {
        let ticket = self.browse_sequence.issue();
        let page = self.get_products(query).await?;

        let accepted = ticket.accept(page);
        if accepted.is_none() {
            tracing::debug!(seq = ticket.seq(), "discarding superseded product page");
        }
        Ok(accepted)
    }

    pub async fn get_product_by_id(&self, id: &str) -> Result<Product> {
        self.api
            .get_product_by_id(id)
            .await
            .map_err(|e| convert("fetch product details", e))
    }

    pub async fn products_by_category(
        &self,
        category: &str,
        query: ProductQuery,
    ) -> Result<ProductPage> {
        self.get_products(&query.with_category(category)).await
    }

    pub async fn search_products(&self, term: &str, query: ProductQuery) -> Result<ProductPage> {
        self.get_products(&query.with_search(term)).await
    }

    pub async fn featured_products(&self, limit: u32) -> Result<Vec<Product>> {
        let query = ProductQuery {
            featured: true,
            ..ProductQuery::default()
        }
        .page(1, limit);
        Ok(self.get_products(&query).await?.data)
    }

    pub async fn new_arrivals(&self, limit: u32) -> Result<Vec<Product>> {
        let query = ProductQuery {
            is_new: true,
            ..ProductQuery::default()
        }
        .page(1, limit);
        Ok(self.get_products(&query).await?.data)
    }

    /// No sales figures exist in the catalog, so this is the first page in
    /// catalog order.
    pub async fn best_sellers(&self, limit: u32) -> Result<Vec<Product>> {
        let query = ProductQuery {
            order: SortOrder::Desc,
            ..ProductQuery::default()
        }
        .page(1, limit);
        self.api
            .get_products(&query)
            .await
            .map(|page| page.data)
            .map_err(|e| convert("fetch best sellers", e))
    }

    /// Other products of the same category, excluding `product_id` itself.
    pub async fn related_products(&self, product_id: &str, limit: u32) -> Result<Vec<Product>> {
        let product = self.get_product_by_id(product_id).await?;
        let query = ProductQuery::default()
            .with_category(product.category.as_str())
            .page(1, limit.saturating_add(1));

        let mut related: Vec<Product> = self
            .get_products(&query)
            .await?
            .data
            .into_iter()
            .filter(|p| p.id != product.id)
            .collect();
        related.truncate(limit as usize);
        Ok(related)
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Validates the form, logs in and records the user in `session`. The
    /// email is checked as typed, so surrounding whitespace is rejected.
    pub async fn login(
        &self,
        session: &mut Session,
        email: &str,
        password: &str,
    ) -> Result<AuthUser> {
        let credentials = Credentials::new(email, password);
        validate_login(&credentials)?;

        let user = self
            .api
            .login(&credentials)
            .await
            .map_err(|e| convert("log in", e))?;

        tracing::info!(user_id = %user.id, "signed in");
        session.sign_in(user.clone());
        Ok(user)
    }

    pub fn logout(&self, session: &mut Session) {
        if let Some(user) = session.sign_out() {
            tracing::info!(user_id = %user.id, "signed out");
        }
    }

    /// The signed-in user, or `None` for anonymous or rejected sessions. A
    /// rejected token clears the session.
    pub async fn current_user(&self, session: &mut Session) -> Result<Option<AuthUser>> {
        let Some(token) = session.token().map(str::to_owned) else {
            return Ok(None);
        };

        match self.api.current_user(&token).await {
            Ok(user) => Ok(Some(user)),
            Err(ApiError::Unauthorized) => {
                self.force_logout(session);
                Ok(None)
            }
            Err(e) => Err(convert("load your profile", e)),
        }
    }

    /// Converts a collaborator result, clearing `session` on `Unauthorized`.
    pub(super) fn settle<T>(
        &self,
        session: &mut Session,
        operation: &'static str,
        result: std::result::Result<T, ApiError>,
    ) -> Result<T> {
        result.map_err(|e| {
            if e == ApiError::Unauthorized {
                self.force_logout(session);
            }
            convert(operation, e)
        })
    }

    fn force_logout(&self, session: &mut Session) {
        if let Some(user) = session.sign_out() {
            tracing::warn!(user_id = %user.id, "session rejected, signed out");
        }
    }
}

/// Maps a collaborator error, logging the ones that become generic.
pub(super) fn convert(operation: &'static str, err: ApiError) -> StoreError {
    if let ApiError::Transport(detail) = &err {
        tracing::error!(%operation, %detail, "collaborator call failed");
    }
    StoreError::from_api(operation, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::fixtures::{generate_products, FixtureOptions};
    use crate::catalog::models::SortKey;
    use crate::catalog::query::Catalog;
    use crate::client::mock::MockStoreApi;
    use std::sync::Arc;
    use std::time::Duration;

    fn storefront() -> Storefront<MockStoreApi> {
        let catalog = Catalog::new(generate_products(&FixtureOptions::default())).unwrap();
        Storefront::new(MockStoreApi::new(Arc::new(catalog)).with_latency(Duration::ZERO))
    }

    #[tokio::test]
    async fn unknown_product_is_user_visible_not_found() {
        let err = storefront().get_product_by_id("product-404").await.unwrap_err();
        assert!(matches!(err, StoreError::ProductNotFound(_)));
        assert_eq!(err.to_string(), "Product not found");
    }

    #[tokio::test]
    async fn transport_failure_is_generic() {
        let sf = storefront();
        sf.api()
            .fail_next_call(ApiError::Transport("socket closed".into()))
            .await;
        let err = sf.get_products(&ProductQuery::default()).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch products. Please try again later.");
    }

    #[tokio::test]
    async fn showcase_helpers_apply_flags_and_limits() {
        let sf = storefront();
        let featured = sf.featured_products(DEFAULT_SHOWCASE_LIMIT).await.unwrap();
        assert_eq!(
            featured.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            ["product-1", "product-11"]
        );

        let arrivals = sf.new_arrivals(1).await.unwrap();
        assert_eq!(arrivals.len(), 1);
        assert!(arrivals[0].is_new);
    }

    #[tokio::test]
    async fn best_sellers_are_the_first_page_in_catalog_order() {
        let sf = storefront();
        let best = sf.best_sellers(DEFAULT_SHOWCASE_LIMIT).await.unwrap();
        assert_eq!(
            best.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            (1..=8).map(|n| format!("product-{n}")).collect::<Vec<_>>()
        );

        sf.api()
            .fail_next_call(ApiError::Transport("reset".into()))
            .await;
        let err = sf.best_sellers(3).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch best sellers. Please try again later.");
    }

    #[tokio::test]
    async fn related_products_exclude_the_product_itself() {
        let sf = storefront();
        let related = sf.related_products("product-1", DEFAULT_RELATED_LIMIT).await.unwrap();
        assert_eq!(
            related.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            ["product-6", "product-11", "product-16"]
        );
    }

    #[tokio::test]
    async fn search_and_category_helpers() {
        let sf = storefront();
        let page = sf
            .search_products(
                "FO-01",
                ProductQuery::default().sorted_by(SortKey::Price, SortOrder::Desc),
            )
            .await
            .unwrap();
        // FO-01 and FO-010 .. FO-019
        assert_eq!(page.meta.total, 11);

        let page = sf
            .products_by_category("Giấy in", ProductQuery::default())
            .await
            .unwrap();
        assert_eq!(page.meta.total, 4);
        assert!(page.data.iter().all(|p| p.category.as_str() == "Giấy in"));
    }

    #[tokio::test]
    async fn login_validates_before_calling_out() {
        let sf = storefront();
        let mut session = Session::new();

        let err = sf.login(&mut session, "", "password").await.unwrap_err();
        assert_eq!(err.to_string(), "Email is required");

        let err = sf.login(&mut session, "user@example.com", "nope").await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidCredentials));
        assert_eq!(err.to_string(), "Invalid email or password");
        assert!(!session.is_authenticated());

        let err = sf.login(&mut session, " user@example.com ", "password").await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a valid email address");
        assert!(!session.is_authenticated());

        let user = sf.login(&mut session, "user@example.com", "password").await.unwrap();
        assert_eq!(user.name, "Nguyễn Văn A");
        assert_eq!(session.token(), Some("mock-jwt-token"));

        sf.logout(&mut session);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_token_clears_the_session() {
        let sf = storefront();
        let mut session = Session::new();
        assert_eq!(sf.current_user(&mut session).await.unwrap(), None);

        sf.login(&mut session, "user@example.com", "password").await.unwrap();
        assert!(sf.current_user(&mut session).await.unwrap().is_some());

        sf.api().expire_tokens();
        assert_eq!(sf.current_user(&mut session).await.unwrap(), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_browse_is_discarded() {
        let catalog = Catalog::new(generate_products(&FixtureOptions::default())).unwrap();
        let sf = Storefront::new(
            MockStoreApi::new(Arc::new(catalog)).with_latency(Duration::from_millis(200)),
        );

        let first = ProductQuery::default().page(1, 5);
        let second = ProductQuery::default().page(2, 5);
        let (stale, fresh) = tokio::join!(sf.browse_products(&first), sf.browse_products(&second));

        assert_eq!(stale.unwrap(), None);
        let fresh = fresh.unwrap().expect("latest browse is kept");
        assert_eq!(fresh.meta.page, 2);
    }
}

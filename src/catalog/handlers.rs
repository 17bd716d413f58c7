//! REST API handlers for the product catalog
//!
//! `GET /products` runs the query engine over the shared catalog and
//! `GET /products/:id` fetches a single product.

use super::models::{DataResponse, Product, ProductPage, ProductQuery, ProductQueryParams};
use crate::error::StoreError;
use crate::state::SharedState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

/// Creates routes for catalog operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}

/// Endpoint: GET /products
/// Malformed paging parameters are coerced to their defaults.
async fn list_products(
    State(state): State<SharedState>,
    Query(params): Query<ProductQueryParams>,
) -> Json<ProductPage> {
    let query = ProductQuery::from(params);
    let page = state.catalog.query(&query);

    tracing::debug!(
        category = query.category.as_deref().unwrap_or("*"),
        sort = query.sort.map(|s| s.as_str()).unwrap_or("none"),
        order = query.order.as_str(),
        total = page.meta.total,
        returned = page.data.len(),
        "product query"
    );

    Json(page)
}

/// Endpoint: GET /products/:id
async fn get_product(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Product>>, StoreError> {
    state
        .catalog
        .get(&id)
        .cloned()
        .map(|data| Json(DataResponse { data }))
        .ok_or(StoreError::ProductNotFound(id))
}

//! Product Query Engine
//!
//! Filter, sort and paginate a product collection, always in that order.

use super::helpers::{check_product, collate, effective_price};
use super::models::{PageMeta, Product, ProductPage, ProductQuery, SortKey, SortOrder};
use crate::error::{Result, StoreError};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::Range;

/// An immutable, validated product collection.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, rejecting duplicate ids and records that break the
    /// product invariants.
    pub fn new(products: Vec<Product>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            check_product(product)?;
            if !seen.insert(product.id.as_str()) {
                return Err(StoreError::Validation(format!(
                    "Duplicate product id {}",
                    product.id
                )));
            }
        }
        Ok(Self { products })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn query(&self, query: &ProductQuery) -> ProductPage {
        run_query(&self.products, query)
    }
}

/// True when `product` passes every active criterion of `query`.
pub fn matches_filters(product: &Product, query: &ProductQuery) -> bool {
    if let Some(category) = &query.category {
        if product.category.as_str() != category {
            return false;
        }
    }
    if query.featured && !product.featured {
        return false;
    }
    if query.is_new && !product.is_new {
        return false;
    }
    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        let hit = product.name.to_lowercase().contains(&needle)
            || product.description.to_lowercase().contains(&needle)
            || product.category.as_str().to_lowercase().contains(&needle);
        if !hit {
            return false;
        }
    }
    true
}

fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => effective_price(a).cmp(&effective_price(b)),
        SortKey::Name => collate(&a.name, &b.name),
        SortKey::Rating => a.rating.total_cmp(&b.rating),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// Stable single-key sort. Ties keep their filtered order in both directions.
pub fn sort_products(products: &mut [&Product], key: SortKey, order: SortOrder) {
    products.sort_by(|a, b| match order {
        SortOrder::Asc => compare(a, b, key),
        SortOrder::Desc => compare(b, a, key),
    });
}

/// Index range of a 1-indexed page, clamped to `total`. Pages past the end
/// give an empty range.
pub fn page_range(total: usize, page: u32, limit: u32) -> Range<usize> {
    let limit = limit.max(1) as usize;
    let start = (page.max(1) as usize - 1).saturating_mul(limit);
    let end = start.saturating_add(limit);
    start.min(total)..end.min(total)
}

/// Runs `query` over `products` and wraps the page in the list envelope.
pub fn run_query(products: &[Product], query: &ProductQuery) -> ProductPage {
    let mut matched: Vec<&Product> = products
        .iter()
        .filter(|p| matches_filters(p, query))
        .collect();

    if let Some(key) = query.sort {
        sort_products(&mut matched, key, query.order);
    }

    let total = matched.len();
    let limit = query.limit.max(1);
    let page = query.page.max(1);
    let data = matched[page_range(total, page, limit)]
        .iter()
        .map(|p| (*p).clone())
        .collect();

    ProductPage {
        data,
        meta: PageMeta {
            total,
            page,
            limit,
            pages: total.div_ceil(limit as usize),
        },
    }
}

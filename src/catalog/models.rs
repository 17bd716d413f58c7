//! Catalog Domain Models
//!
//! Product records, query parameters and the list-response envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// Product Records
// =============================================================================

/// The closed set of catalog categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Bút viết")]
    Pens,
    #[serde(rename = "Văn phòng phẩm")]
    OfficeSupplies,
    #[serde(rename = "Dụng cụ học tập")]
    SchoolSupplies,
    #[serde(rename = "Mỹ thuật")]
    Art,
    #[serde(rename = "Giấy in")]
    PrintingPaper,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Pens,
        Category::OfficeSupplies,
        Category::SchoolSupplies,
        Category::Art,
        Category::PrintingPaper,
    ];

    /// Display label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Pens => "Bút viết",
            Category::OfficeSupplies => "Văn phòng phẩm",
            Category::SchoolSupplies => "Dụng cụ học tập",
            Category::Art => "Mỹ thuật",
            Category::PrintingPaper => "Giấy in",
        }
    }
}

/// A customer review. Owned by its product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub user: String,
    /// 1 to 5.
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
}

/// A catalog product. Prices are integer amounts of đồng.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: i64,
    /// Strictly below `price` when present.
    pub sale_price: Option<i64>,
    pub description: String,
    pub category: Category,
    pub images: Vec<String>,
    pub stock: u32,
    /// 0.0 to 5.0.
    pub rating: f64,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub featured: bool,
    #[serde(rename = "new", default)]
    pub is_new: bool,
    #[serde(default)]
    pub specifications: BTreeMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Query Models
// =============================================================================

/// Sort keys understood by the query engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Price,
    Name,
    Rating,
    CreatedAt,
}

impl SortKey {
    /// Unknown keys yield `None`, which leaves the filtered order untouched.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "price" => Some(SortKey::Price),
            "name" => Some(SortKey::Name),
            "rating" => Some(SortKey::Rating),
            "createdAt" => Some(SortKey::CreatedAt),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Name => "name",
            SortKey::Rating => "rating",
            SortKey::CreatedAt => "createdAt",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only the exact `asc` sorts ascending; any other value sorts
    /// descending. A missing `order` parameter is ascending (the default).
    pub fn parse(raw: &str) -> Self {
        if raw == "asc" {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

/// Raw query-string parameters of `GET /products`. Every field is kept as
/// text so malformed numbers can be coerced instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductQueryParams {
    pub category: Option<String>,
    pub featured: Option<String>,
    #[serde(rename = "new")]
    pub is_new: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// A validated product query.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub featured: bool,
    pub is_new: bool,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub order: SortOrder,
    /// 1-indexed.
    pub page: u32,
    pub limit: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            category: None,
            featured: false,
            is_new: false,
            search: None,
            sort: None,
            order: SortOrder::Asc,
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl ProductQuery {
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort = Some(key);
        self.order = order;
        self
    }

    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }
}

/// Parses a positive integer, falling back to `default` for anything else.
fn positive_or(raw: Option<&str>, default: u32) -> u32 {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|v| !v.is_empty())
}

impl From<ProductQueryParams> for ProductQuery {
    fn from(params: ProductQueryParams) -> Self {
        Self {
            category: non_empty(params.category),
            featured: params.featured.as_deref() == Some("true"),
            is_new: params.is_new.as_deref() == Some("true"),
            search: non_empty(params.search),
            sort: params.sort.as_deref().and_then(SortKey::parse),
            order: params
                .order
                .as_deref()
                .map(SortOrder::parse)
                .unwrap_or_default(),
            page: positive_or(params.page.as_deref(), DEFAULT_PAGE),
            limit: positive_or(params.limit.as_deref(), DEFAULT_LIMIT),
        }
    }
}

// =============================================================================
// Response Envelopes
// =============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    /// Filtered count before pagination.
    pub total: usize,
    pub page: u32,
    pub limit: u32,
    pub pages: usize,
}

/// `{ data, meta }` list envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub meta: PageMeta,
}

/// `{ data }` single-entity envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataResponse<T> {
    pub data: T,
}

//! Seeded mock catalog.
//!
//! Reproduces the demo storefront's twenty Thiên Long products. Everything
//! random (ratings, review scores) comes from a seeded [`StdRng`], and the
//! clock is passed in, so one seed always yields the same catalog.

use super::models::{Category, Product, Review};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::BTreeMap;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_CATALOG_SIZE: usize = 20;
pub const REVIEWS_PER_PRODUCT: usize = 3;

const DESCRIPTION: &str =
    "Bút bi cao cấp với thiết kế hiện đại, mực viết trơn tru và bền màu.";
const REVIEW_COMMENT: &str = "Sản phẩm chất lượng tốt, đóng gói cẩn thận, giao hàng nhanh.";

const SPECIFICATIONS: [(&str, &str); 5] = [
    ("Thương hiệu", "Thiên Long"),
    ("Xuất xứ", "Việt Nam"),
    ("Chất liệu", "Nhựa cao cấp"),
    ("Màu mực", "Xanh/Đen/Đỏ"),
    ("Độ mịn", "0.5mm"),
];

/// Inputs of the generator.
#[derive(Debug, Clone)]
pub struct FixtureOptions {
    pub seed: u64,
    pub count: usize,
    pub now: DateTime<Utc>,
}

impl Default for FixtureOptions {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            count: DEFAULT_CATALOG_SIZE,
            now: Utc::now(),
        }
    }
}

fn category_for(index: usize) -> Category {
    Category::ALL[index % Category::ALL.len()]
}

fn reviews_for(rng: &mut StdRng, now: DateTime<Utc>) -> Vec<Review> {
    (0..REVIEWS_PER_PRODUCT)
        .map(|i| Review {
            id: format!("review-{i}"),
            user: format!("User {}", i + 1),
            rating: rng.gen_range(3..=5),
            comment: REVIEW_COMMENT.to_string(),
            date: now - Duration::days(3 * i as i64),
        })
        .collect()
}

fn product_at(index: usize, rng: &mut StdRng, now: DateTime<Utc>) -> Product {
    let number = index + 1;
    let price = 20_000 + index as i64 * 5_000;
    // 20% off every third product.
    let sale_price = (index % 3 == 0).then(|| price * 4 / 5);
    let stock = if index % 7 == 0 { 0 } else { 10 + index as u32 * 2 };
    let rating = ((3.0 + rng.gen::<f64>() * 2.0) * 10.0).round() / 10.0;

    Product {
        id: format!("product-{number}"),
        name: format!("Bút Thiên Long FlexOffice FO-0{number}"),
        price,
        sale_price,
        description: DESCRIPTION.to_string(),
        category: category_for(index),
        images: (1..=3)
            .map(|view| {
                let suffix = if view == 1 { String::new() } else { format!("-{view}") };
                format!("https://placehold.co/300x300/f0f0f0/333333?text=Product-{number}{suffix}")
            })
            .collect(),
        stock,
        rating,
        reviews: reviews_for(rng, now),
        featured: index % 10 == 0,
        is_new: index % 8 == 0,
        specifications: SPECIFICATIONS
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        created_at: now - Duration::days(index as i64),
        updated_at: now,
    }
}

/// Generates `options.count` products.
pub fn generate_products(options: &FixtureOptions) -> Vec<Product> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    (0..options.count)
        .map(|index| product_at(index, &mut rng, options.now))
        .collect()
}

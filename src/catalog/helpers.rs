//! Product derivations
//!
//! Pure functions over [`Product`] used for rendering and by the query
//! engine. Derivations never fail; missing data yields neutral defaults.
//! [`check_product`] is the one validating entry point.

use super::models::Product;
use crate::error::{Result, StoreError};
use std::cmp::Ordering;

/// The price a customer actually pays: sale price when present.
pub fn effective_price(product: &Product) -> i64 {
    product.sale_price.unwrap_or(product.price)
}

/// Rounded percentage saved by the sale price, or 0 when not discounted.
pub fn discount_percentage(product: &Product) -> i64 {
    match product.sale_price {
        Some(sale) if product.price > 0 => {
            let ratio = (product.price - sale) as f64 / product.price as f64;
            // Half-up rounding, including for malformed sale prices above price.
            (ratio * 100.0 + 0.5).floor() as i64
        }
        _ => 0,
    }
}

pub fn is_on_sale(product: &Product) -> bool {
    matches!(product.sale_price, Some(sale) if sale < product.price)
}

pub fn is_in_stock(product: &Product) -> bool {
    product.stock > 0
}

/// Formats an amount of đồng the way `vi-VN` currency formatting does:
/// dot-grouped thousands, no decimals, a non-breaking space and `₫`.
///
/// ```
/// use stationery_store_rust::catalog::helpers::format_price;
/// assert_eq!(format_price(1_250_000), "1.250.000\u{a0}₫");
/// ```
pub fn format_price(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}{grouped}\u{a0}₫")
}

/// Formats the product's list price.
pub fn format_product_price(product: &Product) -> String {
    format_price(product.price)
}

/// Checks the record-level invariants a catalog relies on.
pub fn check_product(product: &Product) -> Result<()> {
    if product.id.is_empty() {
        return Err(StoreError::Validation("Product id must not be empty".into()));
    }
    if product.price < 0 {
        return Err(StoreError::Validation(format!(
            "Product {} has a negative price",
            product.id
        )));
    }
    if let Some(sale) = product.sale_price {
        if sale >= product.price {
            return Err(StoreError::Validation(format!(
                "Product {} has a sale price {} not below its price {}",
                product.id, sale, product.price
            )));
        }
    }
    if !(0.0..=5.0).contains(&product.rating) {
        return Err(StoreError::Validation(format!(
            "Product {} has a rating outside 0-5",
            product.id
        )));
    }
    Ok(())
}

// =============================================================================
// Name Collation
// =============================================================================

const VIETNAMESE_FOLDS: [(&str, char); 7] = [
    ("àáạảãâầấậẩẫăằắặẳẵ", 'a'),
    ("èéẹẻẽêềếệểễ", 'e'),
    ("ìíịỉĩ", 'i'),
    ("òóọỏõôồốộổỗơờớợởỡ", 'o'),
    ("ùúụủũưừứựửữ", 'u'),
    ("ỳýỵỷỹ", 'y'),
    ("đ", 'd'),
];

fn fold_char(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    VIETNAMESE_FOLDS
        .iter()
        .find(|(set, _)| set.contains(lower))
        .map(|(_, base)| *base)
        .unwrap_or(lower)
}

/// Primary collation key: lowercase with Vietnamese diacritics removed.
fn base_key(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

/// Locale-aware name comparison.
///
/// Letters compare by base letter first, so `"Đỏ"` sorts beside `"do"`
/// rather than after `"z"`. Accents, then case, break ties; lowercase
/// sorts first.
pub fn collate(a: &str, b: &str) -> Ordering {
    base_key(a)
        .cmp(&base_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;
    use chrono::Utc;

    fn product(price: i64, sale_price: Option<i64>, stock: u32) -> Product {
        Product {
            id: "p1".into(),
            name: "Bút bi".into(),
            price,
            sale_price,
            description: String::new(),
            category: Category::Pens,
            images: vec![],
            stock,
            rating: 4.0,
            reviews: vec![],
            featured: false,
            is_new: false,
            specifications: Default::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn discount_percentage_rounds() {
        assert_eq!(discount_percentage(&product(30000, Some(24000), 1)), 20);
        assert_eq!(discount_percentage(&product(30000, Some(20000), 1)), 33);
        assert_eq!(discount_percentage(&product(3, Some(1), 1)), 67);
        assert_eq!(discount_percentage(&product(30000, None, 1)), 0);
        assert_eq!(discount_percentage(&product(0, Some(0), 1)), 0);
    }

    #[test]
    fn sale_and_stock_flags() {
        assert!(is_on_sale(&product(30000, Some(24000), 0)));
        assert!(!is_on_sale(&product(30000, None, 0)));
        assert!(!is_on_sale(&product(30000, Some(30000), 0)));
        assert!(!is_in_stock(&product(30000, None, 0)));
        assert!(is_in_stock(&product(30000, None, 3)));
        assert_eq!(effective_price(&product(30000, Some(24000), 0)), 24000);
        assert_eq!(effective_price(&product(30000, None, 0)), 30000);
    }

    #[test]
    fn formats_vnd() {
        assert_eq!(format_price(0), "0\u{a0}₫");
        assert_eq!(format_price(999), "999\u{a0}₫");
        assert_eq!(format_price(24000), "24.000\u{a0}₫");
        assert_eq!(format_price(500000), "500.000\u{a0}₫");
        assert_eq!(format_price(-6000), "-6.000\u{a0}₫");
        assert_eq!(format_product_price(&product(1_000_000, None, 0)), "1.000.000\u{a0}₫");
    }

    #[test]
    fn invariant_check_rejects_sale_at_or_above_price() {
        assert!(check_product(&product(30000, Some(24000), 0)).is_ok());
        assert!(check_product(&product(30000, Some(30000), 0)).is_err());
        assert!(check_product(&product(30000, Some(40000), 0)).is_err());
    }

    #[test]
    fn collation_groups_accented_letters_with_their_base() {
        assert_eq!(collate("Đỏ", "do"), Ordering::Greater);
        assert_eq!(collate("Đỏ", "e"), Ordering::Less);
        assert_eq!(collate("Bút", "but"), Ordering::Greater);
        assert_eq!(collate("bút", "Bút"), Ordering::Less);
        assert_eq!(collate("Giấy", "Bút"), Ordering::Greater);
        assert_eq!(collate("Mỹ thuật", "Mỹ thuật"), Ordering::Equal);
    }
}

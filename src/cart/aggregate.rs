//! Cart Aggregate
//!
//! A cart owns its line items and keeps its totals as a pure function of
//! those items and the applied discount. Every mutation recomputes them.

use crate::catalog::helpers::effective_price;
use crate::catalog::models::Product;
use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cart line. Name, prices and image are copied from the product when
/// the line is created, so later catalog changes do not affect the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub product_id: String,
    pub name: String,
    /// Effective price at add-time.
    pub price: i64,
    /// List price at add-time.
    pub original_price: i64,
    pub image: Option<String>,
    pub quantity: u32,
}

impl CartItem {
    /// Snapshots `product` into a new line with a fresh id.
    pub fn snapshot(product: &Product, quantity: u32) -> Self {
        Self {
            id: format!("cart-item-{}", Uuid::new_v4().simple()),
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: effective_price(product),
            original_price: product.price,
            image: product.images.first().cloned(),
            quantity,
        }
    }

    pub fn line_total(&self) -> i64 {
        self.price.saturating_mul(i64::from(self.quantity))
    }
}

/// Wire form accepted when deserializing a cart. Derived totals in the
/// input are ignored and recomputed.
#[derive(Debug, Default, Deserialize)]
struct CartData {
    #[serde(default)]
    items: Vec<CartItem>,
    #[serde(default)]
    discount: i64,
}

impl From<CartData> for Cart {
    fn from(data: CartData) -> Self {
        Cart::with_items(data.items, data.discount)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", from = "CartData")]
pub struct Cart {
    items: Vec<CartItem>,
    total_items: u64,
    subtotal: i64,
    discount: i64,
    /// `subtotal - discount`. May be negative.
    total: i64,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from existing lines, computing its totals.
    pub fn with_items(items: Vec<CartItem>, discount: i64) -> Self {
        let mut cart = Self {
            items,
            discount,
            ..Self::default()
        };
        cart.recompute();
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    pub fn total_items(&self) -> u64 {
        self.total_items
    }

    pub fn subtotal(&self) -> i64 {
        self.subtotal
    }

    pub fn discount(&self) -> i64 {
        self.discount
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds `quantity` of `product`, merging into an existing line for the
    /// same product. Stock is not checked here.
    pub fn add_item(&mut self, product: &Product, quantity: u32) -> Result<&Self> {
        if quantity == 0 {
            return Err(StoreError::Validation(
                "Quantity must be at least 1".to_string(),
            ));
        }

        match self.items.iter_mut().find(|i| i.product_id == product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
            None => self.items.push(CartItem::snapshot(product, quantity)),
        }

        self.recompute();
        Ok(self)
    }

    /// Sets a line's quantity; zero or less removes the line. Unknown ids are
    /// ignored.
    pub fn update_item_quantity(&mut self, item_id: &str, quantity: i64) -> &Self {
        if quantity <= 0 {
            return self.remove_item(item_id);
        }

        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }

        self.recompute();
        self
    }

    /// Removes a line. Removing an absent id leaves the cart unchanged.
    pub fn remove_item(&mut self, item_id: &str) -> &Self {
        self.items.retain(|i| i.id != item_id);
        self.recompute();
        self
    }

    /// Empties the cart and resets every total, discount included.
    pub fn clear(&mut self) -> &Self {
        self.items.clear();
        self.discount = 0;
        self.recompute();
        self
    }

    /// Sets an absolute discount. Not clamped: a discount above the subtotal
    /// gives a negative total.
    pub fn apply_discount(&mut self, amount: i64) -> &Self {
        self.discount = amount;
        self.recompute();
        self
    }

    fn recompute(&mut self) {
        self.total_items = self.items.iter().map(|i| u64::from(i.quantity)).sum();
        self.subtotal = self
            .items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.line_total()));
        self.total = self.subtotal - self.discount;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::models::Category;
    use chrono::Utc;

    fn product(id: &str, price: i64, sale_price: Option<i64>) -> Product {
        Product {
            id: id.into(),
            name: format!("Sản phẩm {id}"),
            price,
            sale_price,
            description: String::new(),
            category: Category::OfficeSupplies,
            images: vec![format!("https://img.example/{id}-1.png"), format!("https://img.example/{id}-2.png")],
            stock: 10,
            rating: 4.0,
            reviews: vec![],
            featured: false,
            is_new: false,
            specifications: Default::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn assert_consistent(cart: &Cart) {
        let subtotal: i64 = cart.items().iter().map(|i| i.price * i64::from(i.quantity)).sum();
        let count: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
        assert_eq!(cart.subtotal(), subtotal);
        assert_eq!(cart.total_items(), count);
        assert_eq!(cart.total(), cart.subtotal() - cart.discount());
    }

    #[test]
    fn adding_a_sale_product_snapshots_the_effective_price() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 30000, Some(24000)), 2).unwrap();

        assert_eq!(cart.items().len(), 1);
        let line = &cart.items()[0];
        assert_eq!(line.product_id, "p1");
        assert_eq!(line.price, 24000);
        assert_eq!(line.original_price, 30000);
        assert_eq!(line.quantity, 2);
        assert_eq!(line.image.as_deref(), Some("https://img.example/p1-1.png"));
        assert_eq!(cart.subtotal(), 48000);
        assert_eq!(cart.total(), 48000);
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn adding_the_same_product_merges_lines() {
        let mut cart = Cart::new();
        let p = product("p1", 10000, None);
        cart.add_item(&p, 1).unwrap();
        cart.add_item(&p, 3).unwrap();
        cart.add_item(&product("p2", 5000, None), 1).unwrap();

        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.items()[0].quantity, 4);
        assert_eq!(cart.subtotal(), 45000);
        assert_consistent(&cart);
    }

    #[test]
    fn zero_quantity_add_is_rejected() {
        let mut cart = Cart::new();
        let err = cart.add_item(&product("p1", 10000, None), 0).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn price_is_locked_at_add_time() {
        let mut cart = Cart::new();
        let mut p = product("p1", 10000, None);
        cart.add_item(&p, 1).unwrap();
        p.price = 99000;
        cart.add_item(&p, 1).unwrap();
        assert_eq!(cart.items()[0].price, 10000);
        assert_eq!(cart.subtotal(), 20000);
    }

    #[test]
    fn update_quantity_sets_or_removes() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 10000, None), 1).unwrap();
        cart.add_item(&product("p2", 2000, None), 1).unwrap();
        let first = cart.items()[0].id.clone();
        let second = cart.items()[1].id.clone();

        cart.update_item_quantity(&first, 5);
        assert_eq!(cart.item(&first).map(|i| i.quantity), Some(5));
        assert_consistent(&cart);

        cart.update_item_quantity(&second, 0);
        assert!(cart.item(&second).is_none());
        cart.update_item_quantity(&first, -3);
        assert!(cart.is_empty());
        assert_consistent(&cart);
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 10000, None), 2).unwrap();
        let before = cart.clone();

        cart.update_item_quantity("missing", 7);
        assert_eq!(cart, before);
        cart.remove_item("missing");
        assert_eq!(cart, before);
        cart.remove_item("missing");
        assert_eq!(cart, before);
    }

    #[test]
    fn discount_can_push_total_negative() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 10000, None), 1).unwrap();
        cart.apply_discount(15000);
        assert_eq!(cart.total(), -5000);

        cart.add_item(&product("p2", 10000, None), 1).unwrap();
        assert_eq!(cart.total(), 5000);
        assert_consistent(&cart);
    }

    #[test]
    fn clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_item(&product("p1", 10000, None), 3).unwrap();
        cart.apply_discount(1000);
        cart.clear();
        assert_eq!(cart, Cart::new());
    }

    #[test]
    fn mixed_sequence_keeps_totals_consistent() {
        let mut cart = Cart::new();
        let products: Vec<_> = (0..6)
            .map(|i| product(&format!("p{i}"), 5000 * (i + 1), (i % 2 == 0).then_some(4000 * (i + 1))))
            .collect();

        for (step, p) in products.iter().enumerate() {
            cart.add_item(p, (step as u32 % 3) + 1).unwrap();
            assert_consistent(&cart);
        }
        cart.apply_discount(6000);
        let ids: Vec<_> = cart.items().iter().map(|i| i.id.clone()).collect();
        cart.update_item_quantity(&ids[1], 9);
        assert_consistent(&cart);
        cart.remove_item(&ids[4]);
        assert_consistent(&cart);
        cart.update_item_quantity(&ids[0], 0);
        assert_consistent(&cart);
        assert_eq!(cart.items().len(), 4);
    }

    #[test]
    fn deserializing_recomputes_stale_totals() {
        let json = serde_json::json!({
            "items": [
                { "id": "cart-item-1", "productId": "product-1", "name": "FO-01", "price": 22000,
                  "originalPrice": 22000, "image": null, "quantity": 2 },
                { "id": "cart-item-2", "productId": "product-3", "name": "FO-03", "price": 24000,
                  "originalPrice": 30000, "image": null, "quantity": 1 }
            ],
            "totalItems": 99,
            "subtotal": 1,
            "discount": 6000,
            "total": 0
        });
        let cart: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.subtotal(), 68000);
        assert_eq!(cart.total(), 62000);

        let round = serde_json::to_value(&cart).unwrap();
        assert_eq!(round["totalItems"], 3);
        assert_eq!(round["items"][1]["originalPrice"], 30000);
    }
}

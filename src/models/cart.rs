use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Product, ProductResponse};

/// Session cart: product id (as a string key) to quantity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<String, i32>,
}

impl Cart {
    pub fn quantity_of(&self, product_id: i32) -> i32 {
        self.items
            .get(&product_id.to_string())
            .copied()
            .unwrap_or(0)
    }

    /// Adds one unit unless that would exceed `stock`. Returns false when rejected.
    pub fn add_one(&mut self, product_id: i32, stock: i32) -> bool {
        let current = self.quantity_of(product_id);

        if current + 1 > stock {
            return false;
        }

        self.items.insert(product_id.to_string(), current + 1);
        true
    }

    pub fn remove(&mut self, product_id: i32) {
        self.items.remove(&product_id.to_string());
    }

    /// Ids of every line with a positive quantity. Malformed keys are skipped.
    pub fn product_ids(&self) -> Vec<i32> {
        self.items
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .filter_map(|(key, _)| key.parse().ok())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.product_ids().is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i32,
    pub subtotal: Decimal,
}

#[derive(Debug, Clone, Serialize)]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Decimal,
}

impl CartSummary {
    /// Prices the cart against the products that still exist.
    pub fn build(cart: &Cart, products: Vec<Product>) -> Self {
        let lines: Vec<CartLine> = products
            .into_iter()
            .filter_map(|product| {
                let quantity = cart.quantity_of(product.id);
                if quantity <= 0 {
                    return None;
                }

                let subtotal = product.price * Decimal::from(quantity);
                Some(CartLine {
                    product,
                    quantity,
                    subtotal,
                })
            })
            .collect();

        let total = lines.iter().map(|line| line.subtotal).sum();

        Self { lines, total }
    }

    /// First line asking for more than the product can sell.
    pub fn find_shortage(&self) -> Option<&CartLine> {
        self.lines
            .iter()
            .find(|line| line.quantity > line.product.sellable_stock())
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pre-filled order message for the store's messaging number.
    pub fn share_message(&self) -> String {
        let mut message = String::from("Hello, I would like to place an order for:\n");

        for line in &self.lines {
            message.push_str(&format!(
                "- {}x {} (${})\n",
                line.quantity, line.product.name, line.subtotal
            ));
        }

        message.push_str(&format!(
            "\nTotal: ${}\n\nPlease confirm availability.",
            self.total
        ));

        message
    }
}

#[derive(Debug, Serialize)]
pub struct CartLineResponse {
    pub product: ProductResponse,
    pub quantity: i32,
    pub subtotal: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartLineResponse>,
    pub total_price: Decimal,
    pub share_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(id: i32, cents: i64, stock: i32) -> Product {
        Product {
            id,
            category_id: 1,
            name: format!("Item {}", id),
            description: String::new(),
            price: Decimal::new(cents, 2),
            image: None,
            is_available: true,
            stock,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn add_stops_at_stock() {
        let mut cart = Cart::default();

        assert!(cart.add_one(1, 2));
        assert!(cart.add_one(1, 2));
        assert!(!cart.add_one(1, 2));
        assert_eq!(cart.quantity_of(1), 2);
    }

    #[test]
    fn add_with_no_stock_leaves_cart_empty() {
        let mut cart = Cart::default();

        assert!(!cart.add_one(7, 0));
        assert!(cart.is_empty());
    }

    #[test]
    fn removing_absent_product_is_a_no_op() {
        let mut cart = Cart::default();
        cart.add_one(1, 5);
        let before = cart.clone();

        cart.remove(42);
        assert_eq!(cart, before);

        cart.remove(1);
        assert!(cart.is_empty());
    }

    #[test]
    fn cart_serializes_as_a_plain_map() {
        let mut cart = Cart::default();
        cart.add_one(3, 5);
        cart.add_one(3, 5);

        assert_eq!(serde_json::to_value(&cart).unwrap(), serde_json::json!({"3": 2}));
    }

    #[test]
    fn malformed_keys_are_ignored() {
        let cart: Cart = serde_json::from_value(serde_json::json!({"2": 1, "abc": 4, "5": 0})).unwrap();
        assert_eq!(cart.product_ids(), vec![2]);
    }

    #[test]
    fn total_is_sum_of_line_subtotals() {
        let mut cart = Cart::default();
        cart.add_one(1, 2);
        cart.add_one(1, 2);
        cart.add_one(2, 5);

        let summary = CartSummary::build(&cart, vec![product(1, 1000, 2), product(2, 450, 5)]);

        assert_eq!(summary.lines.len(), 2);
        assert_eq!(summary.lines[0].subtotal, Decimal::new(2000, 2));
        assert_eq!(summary.total, Decimal::new(2450, 2));
        assert_eq!(summary.total.to_string(), "24.50");
    }

    #[test]
    fn deleted_products_drop_out_of_the_total() {
        let mut cart = Cart::default();
        cart.add_one(1, 2);
        cart.add_one(9, 2);

        let summary = CartSummary::build(&cart, vec![product(1, 1000, 2)]);

        assert_eq!(summary.lines.len(), 1);
        assert_eq!(summary.total, Decimal::new(1000, 2));
    }

    #[test]
    fn shortage_is_reported_when_stock_fell() {
        let mut cart = Cart::default();
        cart.add_one(1, 3);
        cart.add_one(1, 3);
        cart.add_one(1, 3);

        let summary = CartSummary::build(&cart, vec![product(1, 1000, 1)]);
        let short = summary.find_shortage().unwrap();

        assert_eq!(short.product.id, 1);
        assert_eq!(short.product.stock, 1);
    }

    #[test]
    fn share_message_lists_each_line_and_total() {
        let mut cart = Cart::default();
        cart.add_one(1, 2);
        cart.add_one(1, 2);

        let summary = CartSummary::build(&cart, vec![product(1, 1000, 2)]);

        assert_eq!(
            summary.share_message(),
            "Hello, I would like to place an order for:\n- 2x Item 1 ($20.00)\n\nTotal: $20.00\n\nPlease confirm availability."
        );
    }
}

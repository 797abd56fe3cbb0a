use serde::{Deserialize, Serialize};

use crate::product::{Product, ProductId};

/// One line in the shopping cart.
///
/// `quantity` is always at least 1; a quantity update to zero or below removes
/// the line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price_inr: f64,
    pub quantity: u32,
}

/// The mutable shopping cart. Lines are owned exclusively by this collection
/// and mutated only through the operations below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add `quantity` packs of a product. Adding a product already in the cart
    /// increments the existing line. A zero quantity is a no-op.
    pub fn add(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }
        match self.lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine {
                product_id: product.id.clone(),
                name: product.name.clone(),
                unit_price_inr: product.price_inr,
                quantity,
            }),
        }
    }

    /// Set the quantity of an existing line. A new quantity of zero or below
    /// removes the line. Unknown product ids are ignored.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.lines.retain(|l| l.product_id != *product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == *product_id) {
            line.quantity = quantity as u32;
        }
    }

    pub fn subtotal_inr(&self) -> f64 {
        self.lines
            .iter()
            .map(|l| l.unit_price_inr * l.quantity as f64)
            .sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: ProductId(id.into()),
            name: format!("Product {id}"),
            description: String::new(),
            pack_size_kg: 5,
            price_inr: price,
        }
    }

    #[test]
    fn add_is_idempotent_additive() {
        let mut cart = Cart::new();
        let p = product("basmati-5", 799.0);
        cart.add(&p, 2);
        cart.add(&p, 3);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 5);
    }

    #[test]
    fn add_zero_quantity_is_a_noop() {
        let mut cart = Cart::new();
        cart.add(&product("kolam-10", 720.0), 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_to_zero_removes_the_line() {
        let mut cart = Cart::new();
        let p = product("kolam-10", 720.0);
        cart.add(&p, 2);
        cart.update_quantity(&p.id, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_to_negative_also_removes() {
        let mut cart = Cart::new();
        let p = product("kolam-10", 720.0);
        cart.add(&p, 2);
        cart.update_quantity(&p.id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn update_replaces_quantity() {
        let mut cart = Cart::new();
        let p = product("kolam-10", 720.0);
        cart.add(&p, 2);
        cart.update_quantity(&p.id, 7);
        assert_eq!(cart.lines()[0].quantity, 7);
    }

    #[test]
    fn update_unknown_product_is_ignored() {
        let mut cart = Cart::new();
        cart.add(&product("kolam-10", 720.0), 1);
        cart.update_quantity(&ProductId("missing".into()), 4);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn subtotal_sums_all_lines() {
        let mut cart = Cart::new();
        cart.add(&product("a", 100.0), 2);
        cart.add(&product("b", 50.0), 1);
        assert_eq!(cart.subtotal_inr(), 250.0);
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::{Cart, CartLine};

/// GST applied to every order subtotal.
pub const TAX_RATE: f64 = 0.18;

/// Unique order identifier, derived from the placement timestamp.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub postcode: String,
    pub phone: String,
}

/// A finalized order. Immutable once created; lives in the session's order
/// history for the rest of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<CartLine>,
    pub subtotal_inr: f64,
    pub taxes_inr: f64,
    pub total_inr: f64,
    pub shipping: ShippingDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
    #[error("cart is empty; add a product before checking out")]
    EmptyCart,
}

impl Order {
    /// Snapshot a non-empty cart into an order.
    ///
    /// Invariants: taxes = subtotal x 0.18 and total = subtotal + taxes.
    pub fn from_cart(
        cart: &Cart,
        shipping: ShippingDetails,
        placed_at: DateTime<Utc>,
    ) -> Result<Order, OrderError> {
        if cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let subtotal = cart.subtotal_inr();
        let taxes = subtotal * TAX_RATE;
        Ok(Order {
            id: OrderId(format!("ORD-{}", placed_at.timestamp_millis())),
            placed_at,
            lines: cart.lines().to_vec(),
            subtotal_inr: subtotal,
            taxes_inr: taxes,
            total_inr: subtotal + taxes,
            shipping,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::{Product, ProductId};

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            name: "A Customer".into(),
            address: "12 Mill Road".into(),
            city: "Raipur".into(),
            postcode: "492001".into(),
            phone: "9000000000".into(),
        }
    }

    fn cart_with(lines: &[(f64, u32)]) -> Cart {
        let mut cart = Cart::new();
        for (i, (price, qty)) in lines.iter().enumerate() {
            let p = Product {
                id: ProductId(format!("p-{i}")),
                name: format!("Product {i}"),
                description: String::new(),
                pack_size_kg: 5,
                price_inr: *price,
            };
            cart.add(&p, *qty);
        }
        cart
    }

    #[test]
    fn totals_follow_the_tax_invariant() {
        let cart = cart_with(&[(100.0, 2), (50.0, 1)]);
        let order = Order::from_cart(&cart, shipping(), Utc::now()).unwrap();
        assert_eq!(order.subtotal_inr, 250.0);
        assert_eq!(order.taxes_inr, 45.0);
        assert_eq!(order.total_inr, 295.0);
        assert_eq!(order.lines.len(), 2);
    }

    #[test]
    fn empty_cart_is_rejected() {
        let cart = Cart::new();
        assert_eq!(
            Order::from_cart(&cart, shipping(), Utc::now()),
            Err(OrderError::EmptyCart)
        );
    }

    #[test]
    fn order_id_derives_from_timestamp() {
        let at = Utc::now();
        let cart = cart_with(&[(10.0, 1)]);
        let order = Order::from_cart(&cart, shipping(), at).unwrap();
        assert_eq!(order.id.0, format!("ORD-{}", at.timestamp_millis()));
    }
}

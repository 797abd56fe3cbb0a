//! Explicitly owned session state.
//!
//! The cart, order history and loaded trace catalog live here, and every
//! mutation goes through a named transition so the rules are testable without
//! any rendering layer. One session is owned by one logical thread; the daemon
//! serializes access behind a lock.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::catalog::BatchCatalog;
use crate::order::{Order, OrderError, ShippingDetails};
use crate::product::{Product, ProductId};
use crate::trace::TraceRecord;

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    cart: Cart,
    orders: Vec<Order>,
    catalog: BatchCatalog,
}

/// Read-only snapshot of the cart plus its running subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub lines: Vec<crate::cart::CartLine>,
    pub subtotal_inr: f64,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: BatchCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog(&self) -> &BatchCatalog {
        &self.catalog
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn cart_view(&self) -> CartView {
        CartView {
            lines: self.cart.lines().to_vec(),
            subtotal_inr: self.cart.subtotal_inr(),
        }
    }

    /// Cart transition: add `quantity` packs of `product`.
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) {
        self.cart.add(product, quantity);
    }

    /// Cart transition: set a line's quantity (zero or below removes it).
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        self.cart.update_quantity(product_id, quantity);
    }

    /// Checkout transition: snapshot the cart into an order, append it to the
    /// history and clear the cart. Atomic from the caller's perspective: a
    /// failure leaves both cart and history untouched.
    pub fn place_order(&mut self, shipping: ShippingDetails) -> Result<Order, OrderError> {
        let order = Order::from_cart(&self.cart, shipping, Utc::now())?;
        self.cart.clear();
        self.orders.push(order.clone());
        Ok(order)
    }

    pub fn trace(&self, batch_id: &str) -> Option<&TraceRecord> {
        self.catalog.get(batch_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: ProductId(id.into()),
            name: format!("Product {id}"),
            description: String::new(),
            pack_size_kg: 5,
            price_inr: price,
        }
    }

    fn shipping() -> ShippingDetails {
        ShippingDetails {
            name: "A Customer".into(),
            address: "12 Mill Road".into(),
            city: "Raipur".into(),
            postcode: "492001".into(),
            phone: "9000000000".into(),
        }
    }

    #[test]
    fn place_order_clears_cart_and_appends_history() {
        let mut session = SessionState::new();
        session.add_to_cart(&product("a", 100.0), 2);
        session.add_to_cart(&product("b", 50.0), 1);

        let order = session.place_order(shipping()).unwrap();
        assert_eq!(order.subtotal_inr, 250.0);
        assert_eq!(order.taxes_inr, 45.0);
        assert_eq!(order.total_inr, 295.0);

        assert!(session.cart_view().lines.is_empty());
        assert_eq!(session.orders().len(), 1);
        assert_eq!(session.orders()[0], order);
    }

    #[test]
    fn failed_checkout_leaves_state_untouched() {
        let mut session = SessionState::new();
        assert_eq!(session.place_order(shipping()), Err(OrderError::EmptyCart));
        assert!(session.orders().is_empty());
    }

    #[test]
    fn orders_accumulate_across_checkouts() {
        let mut session = SessionState::new();
        session.add_to_cart(&product("a", 10.0), 1);
        session.place_order(shipping()).unwrap();
        session.add_to_cart(&product("b", 20.0), 1);
        session.place_order(shipping()).unwrap();
        assert_eq!(session.orders().len(), 2);
    }

    #[test]
    fn trace_lookup_goes_through_the_catalog() {
        let mut rng = StdRng::seed_from_u64(3);
        let catalog = catalog::build("MKRM-Kolam9-2023-Punjab4\n", &mut rng);
        let session = SessionState::with_catalog(catalog);
        assert!(session.trace("MKRM-Kolam9-2023-Punjab4").is_some());
        assert!(session.trace("MKRM-Missing1-2023-Punjab4").is_none());
    }
}

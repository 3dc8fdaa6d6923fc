//! Checkout: store price comparison and the simulated hand-off to a retailer.

pub mod compare;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cart::Cart;
use crate::domain::retailer::{RetailerId, RetailerProfile};
use crate::errors::DomainError;

pub use compare::{compare_stores, MultiplierStoreComparator, StoreComparator, StoreComparison};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    pub total_items: u64,
    pub cart_subtotal: Decimal,
    pub comparison: StoreComparison,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_number: String,
    pub retailer_id: RetailerId,
    pub retailer_name: String,
    pub total: Decimal,
    pub total_items: u64,
    pub placed_at: DateTime<Utc>,
}

pub struct CheckoutService<C = MultiplierStoreComparator> {
    comparator: C,
}

impl Default for CheckoutService<MultiplierStoreComparator> {
    fn default() -> Self {
        Self::new(MultiplierStoreComparator)
    }
}

impl<C> CheckoutService<C>
where
    C: StoreComparator,
{
    pub fn new(comparator: C) -> Self {
        Self { comparator }
    }

    pub fn summarize(
        &self,
        cart: &Cart,
        retailers: &[RetailerProfile],
    ) -> Result<CheckoutSummary, DomainError> {
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }

        let cart_subtotal = cart.subtotal()?;
        let comparison = self.comparator.compare(cart_subtotal, retailers)?;

        Ok(CheckoutSummary { total_items: cart.total_items(), cart_subtotal, comparison })
    }

    /// Hands the cart to `retailer_id` and clears it.
    ///
    /// The cart is left untouched when any step fails.
    pub fn place_order<R>(
        &self,
        cart: &mut Cart,
        retailers: &[RetailerProfile],
        retailer_id: &RetailerId,
        rng: &mut R,
    ) -> Result<OrderConfirmation, DomainError>
    where
        R: Rng + ?Sized,
    {
        let summary = self.summarize(cart, retailers)?;
        let quote = summary
            .comparison
            .quotes
            .iter()
            .find(|quote| &quote.retailer.id == retailer_id)
            .ok_or_else(|| DomainError::UnknownRetailer(retailer_id.0.clone()))?;

        let confirmation = OrderConfirmation {
            order_number: order_number(rng),
            retailer_id: quote.retailer.id.clone(),
            retailer_name: quote.retailer.name.clone(),
            total: quote.total,
            total_items: summary.total_items,
            placed_at: Utc::now(),
        };
        cart.clear();

        info!(
            event_name = "checkout.order.placed",
            order_number = %confirmation.order_number,
            retailer_id = %confirmation.retailer_id,
            total = %confirmation.total,
            "order handed off to retailer"
        );

        Ok(confirmation)
    }
}

fn order_number<R>(rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    format!("ORD-{:06}", rng.gen_range(0..1_000_000u32))
}

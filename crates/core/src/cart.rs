//! Cart session state.
//!
//! The host owns a [`Cart`] and passes it into checkout and recommendation
//! computations. Every line held here has a quantity of at least one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartLineItem;
use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`, incrementing the line if it already exists.
    pub fn add_item(&mut self, product: Product) {
        match self.items.iter_mut().find(|item| item.product.id == product.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.items.push(CartLineItem::new(product)),
        }
    }

    pub fn remove_item(&mut self, product_id: &ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.product.id != product_id);
        self.items.len() != before
    }

    /// Sets the quantity of an existing line. Zero removes the line.
    ///
    /// Returns `false` when the product is not in the cart.
    pub fn update_quantity(&mut self, product_id: &ProductId, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        match self.items.iter_mut().find(|item| &item.product.id == product_id) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|item| &item.product.id == product_id)
    }

    pub fn product_ids(&self) -> impl Iterator<Item = &ProductId> {
        self.items.iter().map(CartLineItem::product_id)
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of line totals, or an error when the amount leaves `Decimal` range.
    pub fn subtotal(&self) -> Result<Decimal, DomainError> {
        self.items.iter().try_fold(Decimal::ZERO, |subtotal, item| {
            subtotal.checked_add(item.line_total()?).ok_or_else(|| {
                DomainError::invalid_argument("cart_subtotal", "amount out of range")
            })
        })
    }
}

impl FromIterator<CartLineItem> for Cart {
    /// Collects line items, merging repeated products and dropping zero quantities.
    fn from_iter<T: IntoIterator<Item = CartLineItem>>(iter: T) -> Self {
        let mut cart = Cart::new();
        for line in iter {
            if line.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|item| item.product.id == line.product.id) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.items.push(line),
            }
        }
        cart
    }
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::product::{Product, ProductId};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product: Product,
    pub quantity: u32,
}

impl CartLineItem {
    pub fn new(product: Product) -> Self {
        Self { product, quantity: 1 }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    /// Price times quantity; fails instead of overflowing.
    pub fn line_total(&self) -> Result<Decimal, DomainError> {
        self.product.price.checked_mul(Decimal::from(self.quantity)).ok_or_else(|| {
            DomainError::invalid_argument(
                "line_total",
                format!("amount out of range for `{}`", self.product.id),
            )
        })
    }
}

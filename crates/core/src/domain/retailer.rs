use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RetailerId(pub String);

impl fmt::Display for RetailerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Static retailer configuration used to simulate store-relative pricing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailerProfile {
    pub id: RetailerId,
    pub name: String,
    pub delivery_fee: Decimal,
    pub min_order: Decimal,
    pub delivery_time: String,
    /// Factor applied to the cart subtotal; `0.98` is two percent cheaper.
    pub price_multiplier: Decimal,
}

impl RetailerProfile {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.0.trim().is_empty() {
            return Err(DomainError::invalid_argument("retailer.id", "must not be empty"));
        }
        if self.delivery_fee < Decimal::ZERO {
            return Err(DomainError::invalid_argument(
                "retailer.delivery_fee",
                format!("retailer {} has a negative delivery fee", self.id),
            ));
        }
        if self.min_order < Decimal::ZERO {
            return Err(DomainError::invalid_argument(
                "retailer.min_order",
                format!("retailer {} has a negative minimum order", self.id),
            ));
        }
        if self.price_multiplier <= Decimal::ZERO {
            return Err(DomainError::invalid_argument(
                "retailer.price_multiplier",
                format!("retailer {} must have a positive price multiplier", self.id),
            ));
        }
        Ok(())
    }
}

/// Per-retailer price for the current cart. Derived, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetailerQuote {
    pub retailer: RetailerProfile,
    pub subtotal: Decimal,
    pub total: Decimal,
    pub meets_minimum_order: bool,
}

impl RetailerQuote {
    pub fn retailer_id(&self) -> &RetailerId {
        &self.retailer.id
    }
}

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

/// Immutable catalog entry. Loaded once from the dataset and never mutated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub href: String,
}

impl Product {
    /// Amount saved against the original price, if the product is discounted.
    pub fn discount_amount(&self) -> Option<Decimal> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }

    /// Whole-percent discount, rounded half away from zero.
    pub fn discount_pct(&self) -> Option<Decimal> {
        let original = self.original_price?;
        let saved = self.discount_amount()?;
        Some(
            (saved / original * Decimal::ONE_HUNDRED)
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.0.trim().is_empty() {
            return Err(DomainError::invalid_argument("product.id", "must not be empty"));
        }
        if self.price < Decimal::ZERO {
            return Err(DomainError::invalid_argument(
                "product.price",
                format!("product {} has a negative price", self.id),
            ));
        }
        if self.original_price.is_some_and(|original| original < Decimal::ZERO) {
            return Err(DomainError::invalid_argument(
                "product.original_price",
                format!("product {} has a negative original price", self.id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{Product, ProductId};
    use crate::errors::DomainError;

    fn product(price: Decimal, original_price: Option<Decimal>) -> Product {
        Product {
            id: ProductId("bregott-75".to_owned()),
            name: "Bregott Butter & Rapeseed Normal Salted 75%".to_owned(),
            brand: "Bregott".to_owned(),
            price,
            original_price,
            image_url: String::new(),
            href: "/products/bregott-75".to_owned(),
        }
    }

    #[test]
    fn discount_is_reported_against_higher_original_price() {
        let product = product(Decimal::new(4790, 2), Some(Decimal::new(5890, 2)));

        assert_eq!(product.discount_amount(), Some(Decimal::new(1100, 2)));
        assert_eq!(product.discount_pct(), Some(Decimal::from(19)));
    }

    #[test]
    fn no_discount_without_a_higher_original_price() {
        assert_eq!(product(Decimal::new(4790, 2), None).discount_amount(), None);
        assert_eq!(
            product(Decimal::new(4790, 2), Some(Decimal::new(4790, 2))).discount_pct(),
            None
        );
    }

    #[test]
    fn negative_price_fails_validation() {
        let error = product(Decimal::NEGATIVE_ONE, None).validate().expect_err("negative price");
        assert!(matches!(error, DomainError::InvalidArgument { ref field, .. } if field == "product.price"));
    }
}

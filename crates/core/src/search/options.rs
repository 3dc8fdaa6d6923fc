use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    PriceAsc,
    PriceDesc,
    Name,
    #[default]
    Relevance,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::Name => "name",
            Self::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "price_asc" => Ok(Self::PriceAsc),
            "price_desc" => Ok(Self::PriceDesc),
            "name" => Ok(Self::Name),
            "relevance" => Ok(Self::Relevance),
            other => Err(DomainError::invalid_argument(
                "sort_by",
                format!("unsupported sort `{other}` (expected price_asc|price_desc|name|relevance)"),
            )),
        }
    }
}

/// Refinements applied after the substring filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub sort_by: SortBy,
}

impl SearchOptions {
    pub fn with_min_price(mut self, min_price: Decimal) -> Self {
        self.min_price = Some(min_price);
        self
    }

    pub fn with_max_price(mut self, max_price: Decimal) -> Self {
        self.max_price = Some(max_price);
        self
    }

    pub fn with_sort(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    pub fn has_active_filters(&self) -> bool {
        self.min_price.is_some() || self.max_price.is_some() || self.sort_by != SortBy::default()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.min_price.is_some_and(|min| min < Decimal::ZERO) {
            return Err(DomainError::invalid_argument("min_price", "must not be negative"));
        }
        if self.max_price.is_some_and(|max| max < Decimal::ZERO) {
            return Err(DomainError::invalid_argument("max_price", "must not be negative"));
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                return Err(DomainError::invalid_argument(
                    "min_price",
                    format!("minimum {min} is greater than maximum {max}"),
                ));
            }
        }
        Ok(())
    }

    pub(crate) fn admits(&self, price: Decimal) -> bool {
        self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{SearchOptions, SortBy};

    #[test]
    fn parses_known_sort_keys() {
        assert_eq!("price_asc".parse::<SortBy>(), Ok(SortBy::PriceAsc));
        assert_eq!(" PRICE_DESC ".parse::<SortBy>(), Ok(SortBy::PriceDesc));
        assert_eq!("name".parse::<SortBy>(), Ok(SortBy::Name));
        assert_eq!("relevance".parse::<SortBy>(), Ok(SortBy::Relevance));
        assert!("popularity".parse::<SortBy>().is_err());
    }

    #[test]
    fn default_options_are_inactive() {
        assert!(!SearchOptions::default().has_active_filters());
        assert!(SearchOptions::default().with_sort(SortBy::Name).has_active_filters());
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let options =
            SearchOptions::default().with_min_price(Decimal::from(10)).with_max_price(Decimal::from(20));

        assert!(options.admits(Decimal::from(10)));
        assert!(options.admits(Decimal::from(20)));
        assert!(!options.admits(Decimal::new(2001, 2)));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let options =
            SearchOptions::default().with_min_price(Decimal::from(30)).with_max_price(Decimal::from(20));
        assert!(options.validate().is_err());
        assert!(SearchOptions::default().with_max_price(Decimal::NEGATIVE_ONE).validate().is_err());
    }
}

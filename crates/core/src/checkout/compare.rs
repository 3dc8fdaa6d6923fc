use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::retailer::{RetailerId, RetailerProfile, RetailerQuote};
use crate::errors::DomainError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreComparison {
    pub cart_subtotal: Decimal,
    /// Ascending by total; equal totals keep retailer input order.
    pub quotes: Vec<RetailerQuote>,
    pub cheapest: Option<RetailerId>,
}

impl StoreComparison {
    pub fn cheapest_quote(&self) -> Option<&RetailerQuote> {
        self.quotes.first()
    }

    /// Difference between the most and least expensive totals.
    pub fn spread(&self) -> Decimal {
        match (self.quotes.first(), self.quotes.last()) {
            (Some(cheapest), Some(priciest)) => priciest.total - cheapest.total,
            _ => Decimal::ZERO,
        }
    }
}

pub trait StoreComparator: Send + Sync {
    fn compare(
        &self,
        cart_subtotal: Decimal,
        retailers: &[RetailerProfile],
    ) -> Result<StoreComparison, DomainError>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct MultiplierStoreComparator;

impl StoreComparator for MultiplierStoreComparator {
    fn compare(
        &self,
        cart_subtotal: Decimal,
        retailers: &[RetailerProfile],
    ) -> Result<StoreComparison, DomainError> {
        let quotes = compare_stores(cart_subtotal, retailers)?;
        let cheapest = quotes.first().map(|quote| quote.retailer.id.clone());
        Ok(StoreComparison { cart_subtotal, quotes, cheapest })
    }
}

/// Prices the cart at every retailer and orders the quotes by total.
///
/// A negative `cart_subtotal` is rejected rather than clamped.
pub fn compare_stores(
    cart_subtotal: Decimal,
    retailers: &[RetailerProfile],
) -> Result<Vec<RetailerQuote>, DomainError> {
    if cart_subtotal < Decimal::ZERO {
        return Err(DomainError::invalid_argument("cart_subtotal", "must not be negative"));
    }
    for retailer in retailers {
        retailer.validate()?;
    }

    let mut quotes = retailers
        .iter()
        .map(|retailer| quote_retailer(cart_subtotal, retailer))
        .collect::<Result<Vec<_>, _>>()?;
    // `sort_by` is stable, so tied totals keep their input order.
    quotes.sort_by(|left, right| left.total.cmp(&right.total));

    debug!(
        event_name = "checkout.compare.completed",
        retailer_count = quotes.len(),
        cheapest = quotes.first().map(|quote| quote.retailer.id.0.as_str()).unwrap_or("none"),
        "store comparison computed"
    );

    Ok(quotes)
}

fn quote_retailer(
    cart_subtotal: Decimal,
    retailer: &RetailerProfile,
) -> Result<RetailerQuote, DomainError> {
    let out_of_range = || DomainError::invalid_argument("cart_subtotal", "amount out of range");
    let subtotal = cart_subtotal.checked_mul(retailer.price_multiplier).ok_or_else(out_of_range)?;
    let total = subtotal.checked_add(retailer.delivery_fee).ok_or_else(out_of_range)?;

    Ok(RetailerQuote {
        retailer: retailer.clone(),
        subtotal,
        total,
        meets_minimum_order: subtotal >= retailer.min_order,
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{compare_stores, MultiplierStoreComparator, StoreComparator};
    use crate::domain::retailer::{RetailerId, RetailerProfile};
    use crate::errors::DomainError;

    fn retailer(id: &str, fee: i64, multiplier: Decimal) -> RetailerProfile {
        RetailerProfile {
            id: RetailerId(id.to_owned()),
            name: id.to_uppercase(),
            delivery_fee: Decimal::from(fee),
            min_order: Decimal::from(500),
            delivery_time: "1 day".to_owned(),
            price_multiplier: multiplier,
        }
    }

    fn demo_retailers() -> Vec<RetailerProfile> {
        vec![
            retailer("ica", 49, Decimal::ONE),
            retailer("coop", 39, Decimal::new(103, 2)),
            retailer("willys", 29, Decimal::new(98, 2)),
            retailer("hemkop", 59, Decimal::new(105, 2)),
        ]
    }

    #[test]
    fn ranks_retailers_by_total_cost() {
        let quotes = compare_stores(Decimal::from(500), &demo_retailers()).expect("valid input");

        let ids: Vec<&str> = quotes.iter().map(|quote| quote.retailer.id.0.as_str()).collect();
        let totals: Vec<Decimal> = quotes.iter().map(|quote| quote.total).collect();

        assert_eq!(ids, vec!["willys", "ica", "coop", "hemkop"]);
        assert_eq!(
            totals,
            vec![Decimal::from(519), Decimal::from(549), Decimal::from(554), Decimal::from(584)]
        );
        assert_eq!(quotes[0].subtotal, Decimal::from(490));
    }

    #[test]
    fn equal_totals_keep_input_order() {
        let retailers = vec![
            retailer("first", 10, Decimal::ONE),
            retailer("cheap", 0, Decimal::ONE),
            retailer("second", 10, Decimal::ONE),
            retailer("third", 10, Decimal::ONE),
        ];

        let quotes = compare_stores(Decimal::from(100), &retailers).expect("valid input");
        let ids: Vec<&str> = quotes.iter().map(|quote| quote.retailer.id.0.as_str()).collect();

        assert_eq!(ids, vec!["cheap", "first", "second", "third"]);
    }

    #[test]
    fn output_is_non_decreasing_and_same_length() {
        let retailers = demo_retailers();
        let quotes = compare_stores(Decimal::new(123_45, 2), &retailers).expect("valid input");

        assert_eq!(quotes.len(), retailers.len());
        assert!(quotes.windows(2).all(|pair| pair[0].total <= pair[1].total));
    }

    #[test]
    fn empty_retailer_list_yields_empty_result() {
        let quotes = compare_stores(Decimal::from(500), &[]).expect("empty list is valid");
        assert!(quotes.is_empty());

        let comparison =
            MultiplierStoreComparator.compare(Decimal::from(500), &[]).expect("valid input");
        assert_eq!(comparison.cheapest, None);
        assert_eq!(comparison.spread(), Decimal::ZERO);
    }

    #[test]
    fn negative_subtotal_is_rejected() {
        let error =
            compare_stores(Decimal::NEGATIVE_ONE, &demo_retailers()).expect_err("negative subtotal");
        assert!(matches!(error, DomainError::InvalidArgument { ref field, .. } if field == "cart_subtotal"));
    }

    #[test]
    fn non_positive_multiplier_is_rejected() {
        let retailers = vec![retailer("broken", 10, Decimal::ZERO)];
        let error = compare_stores(Decimal::from(100), &retailers).expect_err("zero multiplier");
        assert!(matches!(error, DomainError::InvalidArgument { .. }));
    }

    #[test]
    fn comparator_surfaces_cheapest_retailer() {
        let comparison = MultiplierStoreComparator
            .compare(Decimal::from(500), &demo_retailers())
            .expect("valid input");

        assert_eq!(comparison.cheapest, Some(RetailerId("willys".to_owned())));
        assert_eq!(
            comparison.cheapest_quote().map(|quote| quote.retailer.price_multiplier),
            Some(Decimal::new(98, 2))
        );
        assert_eq!(comparison.spread(), Decimal::from(65));
    }

    #[test]
    fn minimum_order_flag_uses_retailer_subtotal() {
        let quotes = compare_stores(Decimal::from(500), &demo_retailers()).expect("valid input");
        let willys = quotes.iter().find(|quote| quote.retailer.id.0 == "willys").expect("willys");
        let ica = quotes.iter().find(|quote| quote.retailer.id.0 == "ica").expect("ica");

        assert!(!willys.meets_minimum_order);
        assert!(ica.meets_minimum_order);
    }

    #[test]
    fn out_of_range_amounts_are_rejected() {
        let scaled = vec![retailer("hemkop", 59, Decimal::new(105, 2))];
        let error = compare_stores(Decimal::MAX, &scaled).expect_err("multiplier overflow");
        assert!(matches!(error, DomainError::InvalidArgument { ref field, .. } if field == "cart_subtotal"));

        let with_fee = vec![retailer("ica", 49, Decimal::ONE)];
        let error = compare_stores(Decimal::MAX, &with_fee).expect_err("delivery fee overflow");
        assert!(matches!(error, DomainError::InvalidArgument { .. }));
    }
}

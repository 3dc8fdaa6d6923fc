//! Catalog text search.
//!
//! A product matches when any query term is a substring of its lowercased
//! name or brand. Matches are then narrowed by inclusive price bounds and
//! ordered by [`SortBy`]. Every ordering is stable.

mod history;
mod options;
mod query;

pub use history::{SearchHistory, SearchSession, DEFAULT_HISTORY_LIMIT};
pub use options::{SearchOptions, SortBy};
pub use query::{score_query, ScoredProduct, SearchQuery};

use std::cmp::Reverse;

use tracing::debug;

use crate::domain::product::Product;
use crate::errors::DomainError;

/// Filters and orders `catalog` for `query`.
///
/// A blank query returns the catalog unchanged and ignores `options`.
pub fn search_catalog(
    catalog: &[Product],
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<Product>, DomainError> {
    options.validate()?;

    let query = SearchQuery::parse(query);
    if query.is_blank() {
        return Ok(catalog.to_vec());
    }

    let mut matches: Vec<ScoredProduct> = catalog
        .iter()
        .filter(|product| query.matches(product))
        .filter(|product| options.admits(product.price))
        .map(|product| score_query(&query, product))
        .collect();

    match options.sort_by {
        SortBy::PriceAsc => matches.sort_by(|a, b| a.product.price.cmp(&b.product.price)),
        SortBy::PriceDesc => matches.sort_by(|a, b| b.product.price.cmp(&a.product.price)),
        SortBy::Name => matches.sort_by(|a, b| {
            a.product.name.to_lowercase().cmp(&b.product.name.to_lowercase())
        }),
        SortBy::Relevance => matches.sort_by_key(|scored| Reverse(scored.score)),
    }

    debug!(
        event_name = "search.catalog.completed",
        terms = query.terms.len(),
        sort_by = %options.sort_by,
        result_count = matches.len(),
        "catalog search completed"
    );

    Ok(matches.into_iter().map(|scored| scored.product).collect())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{search_catalog, SearchOptions, SortBy};
    use crate::domain::product::{Product, ProductId};

    fn product(id: &str, name: &str, brand: &str, price: i64) -> Product {
        Product {
            id: ProductId(id.to_owned()),
            name: name.to_owned(),
            brand: brand.to_owned(),
            price: Decimal::new(price, 2),
            original_price: None,
            image_url: String::new(),
            href: format!("/products/{id}"),
        }
    }

    fn catalog() -> Vec<Product> {
        vec![
            product("1", "Bregott Butter & Rapeseed", "Bregott", 4790),
            product("2", "Coca-Cola 1.5L", "Coca-Cola", 2495),
            product("3", "Coca-Cola Zero 1.5L", "Coca-Cola", 1950),
            product("4", "Oat Drink Barista", "Oatly", 2490),
            product("5", "iKaffe Oat Drink", "Oatly", 1600),
            product("6", "Zero Sugar Lemonade", "Zingo", 1950),
        ]
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|product| product.id.0.as_str()).collect()
    }

    #[test]
    fn blank_query_passes_catalog_through() {
        let catalog = catalog();
        let options = SearchOptions::default().with_sort(SortBy::PriceAsc);

        assert_eq!(search_catalog(&catalog, "", &options).expect("search"), catalog);
        assert_eq!(search_catalog(&catalog, "   ", &options).expect("search"), catalog);
    }

    #[test]
    fn finds_product_by_partial_name() {
        let results =
            search_catalog(&catalog(), "coca", &SearchOptions::default()).expect("search");
        assert!(results.iter().any(|product| product.name == "Coca-Cola 1.5L"));
    }

    #[test]
    fn matches_brand_case_insensitively() {
        let results =
            search_catalog(&catalog(), "OATLY", &SearchOptions::default()).expect("search");
        assert_eq!(ids(&results), vec!["4", "5"]);
    }

    #[test]
    fn relevance_orders_by_matching_term_count_and_keeps_ties_stable() {
        let results =
            search_catalog(&catalog(), "zero cola", &SearchOptions::default()).expect("search");

        // "3" matches both terms; "2" and "6" match one each and keep catalog order.
        assert_eq!(ids(&results), vec!["3", "2", "6"]);
    }

    #[test]
    fn price_sorts_are_stable() {
        let ascending = search_catalog(
            &catalog(),
            "zero oat",
            &SearchOptions::default().with_sort(SortBy::PriceAsc),
        )
        .expect("search");
        assert_eq!(ids(&ascending), vec!["5", "3", "6", "4"]);

        let descending = search_catalog(
            &catalog(),
            "zero oat",
            &SearchOptions::default().with_sort(SortBy::PriceDesc),
        )
        .expect("search");
        assert_eq!(ids(&descending), vec!["4", "3", "6", "5"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let results = search_catalog(
            &catalog(),
            "oat",
            &SearchOptions::default().with_sort(SortBy::Name),
        )
        .expect("search");
        assert_eq!(ids(&results), vec!["5", "4"]);
    }

    #[test]
    fn price_bounds_apply_after_the_text_filter() {
        let options = SearchOptions::default()
            .with_min_price(Decimal::new(1950, 2))
            .with_max_price(Decimal::new(2490, 2));
        let results = search_catalog(&catalog(), "zero oat cola", &options).expect("search");

        assert_eq!(ids(&results), vec!["3", "4", "6"]);
    }

    #[test]
    fn invalid_bounds_are_rejected_at_entry() {
        let options = SearchOptions::default().with_min_price(Decimal::NEGATIVE_ONE);
        assert!(search_catalog(&catalog(), "oat", &options).is_err());
    }

    #[test]
    fn repeated_searches_are_identical_and_leave_catalog_untouched() {
        let catalog = catalog();
        let snapshot = catalog.clone();
        let options = SearchOptions::default();

        let first = search_catalog(&catalog, "oat zero", &options).expect("search");
        let second = search_catalog(&catalog, "oat zero", &options).expect("search");

        assert_eq!(first, second);
        assert_eq!(catalog, snapshot);
    }
}

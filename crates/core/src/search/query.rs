use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

/// A free-text query split into lowercase whitespace-delimited terms.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub raw: String,
    pub terms: Vec<String>,
}

impl SearchQuery {
    pub fn parse(raw: &str) -> Self {
        let terms = raw.split_whitespace().map(str::to_lowercase).collect();
        Self { raw: raw.to_owned(), terms }
    }

    pub fn is_blank(&self) -> bool {
        self.terms.is_empty()
    }

    /// True when any term occurs in the product's name or brand.
    pub fn matches(&self, product: &Product) -> bool {
        let haystack = SearchText::from(product);
        self.terms.iter().any(|term| haystack.contains(term))
    }

    /// Number of terms that occur in the product's name or brand.
    pub fn score(&self, product: &Product) -> usize {
        let haystack = SearchText::from(product);
        self.terms.iter().filter(|term| haystack.contains(term)).count()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredProduct {
    pub product: Product,
    pub score: usize,
}

pub fn score_query(query: &SearchQuery, product: &Product) -> ScoredProduct {
    ScoredProduct { product: product.clone(), score: query.score(product) }
}

struct SearchText {
    name: String,
    brand: String,
}

impl SearchText {
    fn contains(&self, term: &str) -> bool {
        self.name.contains(term) || self.brand.contains(term)
    }
}

impl From<&Product> for SearchText {
    fn from(product: &Product) -> Self {
        Self { name: product.name.to_lowercase(), brand: product.brand.to_lowercase() }
    }
}

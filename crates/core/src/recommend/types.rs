use serde::{Deserialize, Serialize};

use crate::domain::product::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationSource {
    /// Ranked by keyword overlap with the cart
    KeywordMatch,
    /// Ranked with no keyword overlap; keeps catalog order
    CatalogOrder,
    /// Sampled at random to fill remaining slots
    RandomFill,
}

impl RecommendationSource {
    pub fn description(&self) -> &'static str {
        match self {
            RecommendationSource::KeywordMatch => "Complements your current selection",
            RecommendationSource::CatalogOrder => "More from the catalog",
            RecommendationSource::RandomFill => "You might also like",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product: Product,
    /// Keyword matches; zero unless the source is `KeywordMatch`
    pub score: usize,
    pub source: RecommendationSource,
}

//! Recommendation engine implementation

use std::cmp::Reverse;
use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use super::scoring::{relevance_score, KeywordExtractor};
use super::types::{Recommendation, RecommendationSource};
use crate::domain::cart::CartLineItem;
use crate::domain::product::{Product, ProductId};

#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    extractor: KeywordExtractor,
}

impl RecommendationEngine {
    pub fn new(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    /// Up to `max_count` catalog products not already in the cart.
    pub fn recommend<R>(
        &self,
        cart: &[CartLineItem],
        catalog: &[Product],
        max_count: usize,
        rng: &mut R,
    ) -> Vec<Product>
    where
        R: Rng + ?Sized,
    {
        self.recommend_scored(cart, catalog, max_count, rng)
            .into_iter()
            .map(|recommendation| recommendation.product)
            .collect()
    }

    pub fn recommend_scored<R>(
        &self,
        cart: &[CartLineItem],
        catalog: &[Product],
        max_count: usize,
        rng: &mut R,
    ) -> Vec<Recommendation>
    where
        R: Rng + ?Sized,
    {
        if max_count == 0 {
            return Vec::new();
        }

        let excluded: HashSet<&ProductId> = cart.iter().map(CartLineItem::product_id).collect();
        let keywords = self.extractor.extract(cart);

        let mut recommendations = if keywords.is_empty() {
            // Nothing to rank against; every slot is random fill.
            Vec::new()
        } else {
            let mut scored: Vec<Recommendation> = catalog
                .iter()
                .filter(|product| !excluded.contains(&product.id))
                .map(|product| {
                    let score = relevance_score(&keywords, product);
                    let source = if score > 0 {
                        RecommendationSource::KeywordMatch
                    } else {
                        RecommendationSource::CatalogOrder
                    };
                    Recommendation { product: product.clone(), score, source }
                })
                .collect();
            scored.sort_by_key(|recommendation| Reverse(recommendation.score));
            scored.truncate(max_count);
            scored
        };

        let missing = max_count - recommendations.len();
        if missing > 0 {
            let fill = {
                let taken: HashSet<&ProductId> = recommendations
                    .iter()
                    .map(|recommendation| &recommendation.product.id)
                    .chain(excluded.iter().copied())
                    .collect();
                sample_products(catalog, &taken, missing, rng)
            };
            recommendations.extend(fill.into_iter().map(|product| Recommendation {
                product,
                score: 0,
                source: RecommendationSource::RandomFill,
            }));
        }

        debug!(
            event_name = "recommend.completed",
            cart_items = cart.len(),
            keywords = keywords.len(),
            requested = max_count,
            returned = recommendations.len(),
            "recommendations computed"
        );

        recommendations
    }
}

/// Recommends with the default keyword rules.
pub fn recommend<R>(
    cart: &[CartLineItem],
    catalog: &[Product],
    max_count: usize,
    rng: &mut R,
) -> Vec<Product>
where
    R: Rng + ?Sized,
{
    RecommendationEngine::default().recommend(cart, catalog, max_count, rng)
}

/// Samples without replacement by shuffling a copy of the eligible indices.
fn sample_products<R>(
    catalog: &[Product],
    excluded: &HashSet<&ProductId>,
    count: usize,
    rng: &mut R,
) -> Vec<Product>
where
    R: Rng + ?Sized,
{
    let mut eligible: Vec<usize> = catalog
        .iter()
        .enumerate()
        .filter(|(_, product)| !excluded.contains(&product.id))
        .map(|(index, _)| index)
        .collect();
    eligible.shuffle(rng);

    // Duplicate ids in the catalog must not produce duplicate picks.
    let mut picked: HashSet<&ProductId> = HashSet::new();
    let mut sample = Vec::new();
    for product in eligible.into_iter().filter_map(|index| catalog.get(index)) {
        if sample.len() == count {
            break;
        }
        if picked.insert(&product.id) {
            sample.push(product.clone());
        }
    }
    sample
}

//! Keyword extraction and relevance scoring for recommendations

use std::collections::HashSet;

use super::{MIN_KEYWORD_CHARS, STOP_WORDS};
use crate::domain::cart::CartLineItem;
use crate::domain::product::Product;

/// Derives keywords from cart item names
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    min_chars: usize,
    stop_words: HashSet<String>,
}

impl KeywordExtractor {
    pub fn new() -> Self {
        Self::with_rules(MIN_KEYWORD_CHARS, STOP_WORDS.iter().copied())
    }

    /// Keep words longer than `min_chars` that are not in `stop_words`.
    pub fn with_rules<'a>(min_chars: usize, stop_words: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            min_chars,
            stop_words: stop_words.into_iter().map(str::to_lowercase).collect(),
        }
    }

    /// Distinct keywords in first-seen order
    pub fn extract(&self, items: &[CartLineItem]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();

        for item in items {
            let name = item.product.name.to_lowercase();
            for word in name.split_whitespace() {
                if word.chars().count() <= self.min_chars || self.stop_words.contains(word) {
                    continue;
                }
                if seen.insert(word.to_owned()) {
                    keywords.push(word.to_owned());
                }
            }
        }

        keywords
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn extract_keywords(items: &[CartLineItem]) -> Vec<String> {
    KeywordExtractor::default().extract(items)
}

/// Counts keywords that overlap a word of the product's name and brand.
///
/// Overlap is a substring match in either direction, so "milk" and "milky"
/// match each other.
pub fn relevance_score(keywords: &[String], product: &Product) -> usize {
    let text = format!("{} {}", product.name, product.brand).to_lowercase();
    let words: Vec<&str> = text.split_whitespace().collect();

    keywords
        .iter()
        .filter(|keyword| {
            words.iter().any(|word| word.contains(keyword.as_str()) || keyword.contains(word))
        })
        .count()
}

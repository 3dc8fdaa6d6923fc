//! Cart-based product recommendations.
//!
//! Candidates are ranked by how many keywords from the cart's product names
//! appear in them. Slots that keyword matching cannot fill are padded with a
//! random sample of the remaining catalog.

mod engine;
mod scoring;
mod types;

pub use engine::{recommend, RecommendationEngine};
pub use scoring::{extract_keywords, relevance_score, KeywordExtractor};
pub use types::*;

/// Recommendations returned when the caller does not ask for a count.
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 4;

/// Keywords must be longer than this many characters.
pub const MIN_KEYWORD_CHARS: usize = 3;

pub const STOP_WORDS: &[&str] = &["with", "from", "the"];

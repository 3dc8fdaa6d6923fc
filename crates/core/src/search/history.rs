use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::{search_catalog, SearchOptions};
use crate::config::SearchConfig;
use crate::domain::product::Product;
use crate::errors::DomainError;

pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Most recent distinct search terms, newest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHistory {
    limit: usize,
    terms: VecDeque<String>,
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl SearchHistory {
    pub fn with_limit(limit: usize) -> Self {
        Self { limit, terms: VecDeque::new() }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::with_limit(config.history_limit)
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Records `term` unless it is blank or already present.
    ///
    /// Returns whether the term is now held; a zero limit holds nothing.
    pub fn record(&mut self, term: &str) -> bool {
        if self.limit == 0
            || term.trim().is_empty()
            || self.terms.iter().any(|existing| existing == term)
        {
            return false;
        }

        self.terms.push_front(term.to_owned());
        self.terms.truncate(self.limit);
        true
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn clear(&mut self) {
        self.terms.clear();
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchSession {
    term: String,
    results: Vec<Product>,
    history: SearchHistory,
}

impl SearchSession {
    pub fn new(history: SearchHistory) -> Self {
        Self { term: String::new(), results: Vec::new(), history }
    }

    /// Session whose history holds `search.history_limit` terms.
    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(SearchHistory::from_config(config))
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_searching(&self) -> bool {
        !self.term.trim().is_empty()
    }

    /// Searches for the current term and records it in the history.
    ///
    /// A blank term clears the results instead of listing the catalog.
    pub fn run(
        &mut self,
        catalog: &[Product],
        options: &SearchOptions,
    ) -> Result<&[Product], DomainError> {
        if !self.is_searching() {
            self.results.clear();
            return Ok(&self.results);
        }

        self.results = search_catalog(catalog, &self.term, options)?;
        self.history.record(&self.term);
        Ok(&self.results)
    }

    pub fn results(&self) -> &[Product] {
        &self.results
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut SearchHistory {
        &mut self.history
    }

    pub fn clear(&mut self) {
        self.term.clear();
        self.results.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::{SearchHistory, SearchSession};
    use crate::config::SearchConfig;
    use crate::fixtures;
    use crate::search::{SearchOptions, SortBy};

    #[test]
    fn history_keeps_newest_first_without_duplicates_or_blanks() {
        let mut history = SearchHistory::with_limit(3);

        assert!(history.record("milk"));
        assert!(history.record("bread"));
        assert!(!history.record("milk"));
        assert!(!history.record("   "));
        assert!(history.record("cheese"));
        assert!(history.record("coffee"));

        assert_eq!(history.terms().collect::<Vec<_>>(), vec!["coffee", "cheese", "bread"]);
    }

    #[test]
    fn default_history_holds_ten_terms() {
        let mut history = SearchHistory::default();
        for index in 0..15 {
            history.record(&format!("term-{index}"));
        }

        assert_eq!(history.len(), 10);
        assert_eq!(history.terms().next(), Some("term-14"));
    }

    #[test]
    fn session_records_successful_searches() {
        let catalog = fixtures::demo_catalog();
        let mut session = SearchSession::default();
        session.set_term("coca");

        let found = session.run(catalog.products(), &SearchOptions::default()).expect("search").len();

        assert!(found > 0);
        assert!(session.is_searching());
        assert_eq!(session.history().terms().collect::<Vec<_>>(), vec!["coca"]);
    }

    #[test]
    fn blank_session_term_yields_no_results() {
        let catalog = fixtures::demo_catalog();
        let mut session = SearchSession::default();
        session.set_term("  ");

        let results = session.run(catalog.products(), &SearchOptions::default()).expect("search");

        assert!(results.is_empty());
        assert!(session.history().is_empty());
    }

    #[test]
    fn clear_resets_term_and_results_but_keeps_history() {
        let catalog = fixtures::demo_catalog();
        let mut session = SearchSession::default();
        session.set_term("oat");
        session.run(catalog.products(), &SearchOptions::default()).expect("search");

        session.clear();

        assert!(!session.is_searching());
        assert!(session.results().is_empty());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn configured_history_limit_bounds_the_session() {
        let catalog = fixtures::demo_catalog();
        let config = SearchConfig { history_limit: 3, default_sort: SortBy::Relevance };
        let mut session = SearchSession::from_config(&config);

        for term in ["coca", "milk", "oat", "bread", "butter"] {
            session.set_term(term);
            session.run(catalog.products(), &SearchOptions::default()).expect("search");
        }

        assert_eq!(session.history().limit(), 3);
        assert_eq!(session.history().terms().collect::<Vec<_>>(), vec!["butter", "bread", "oat"]);
    }

    #[test]
    fn zero_limit_history_retains_nothing() {
        let mut history = SearchHistory::with_limit(0);

        assert!(!history.record("milk"));
        assert!(history.is_empty());
    }
}

//! Owner of the current search term.

use super::page::SearchQuery;

/// Holds the filter the operator typed.
///
/// Every `set_term` starts a new query, even when the term is unchanged:
/// resubmitting is how a failed first page gets retried.
#[derive(Debug, Default)]
pub struct SearchTermController {
    current: SearchQuery,
    submissions: u64,
}

impl SearchTermController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the term and return the query the result set must restart from.
    pub fn set_term(&mut self, term: impl Into<String>) -> SearchQuery {
        self.current = SearchQuery::new(term);
        self.submissions += 1;
        self.current.clone()
    }

    pub fn current(&self) -> &SearchQuery {
        &self.current
    }

    /// How many times a term has been submitted, the initial one included.
    pub fn submissions(&self) -> u64 {
        self.submissions
    }
}

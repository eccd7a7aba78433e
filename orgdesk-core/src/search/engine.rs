//! Cursor pagination engine.
//!
//! The engine owns the result set for the current query epoch. It never
//! performs I/O itself: `start` and `load_more` hand out `FetchRequest`s,
//! and whoever runs them feeds the answers back through `apply`. Answers
//! tagged with an older epoch, or arriving after teardown, are dropped.

use std::collections::HashSet;

use super::page::{
    Cursor, Epoch, FetchFailure, FetchKind, FetchRequest, FetchResponse, Identified, PageRequest,
    ResultPage, SearchQuery,
};

/// What happened when a response was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Page 1 replaced the (empty) result set.
    FirstPage { count: usize },
    /// A next page was appended. `skipped` counts ids already present.
    Appended { count: usize, skipped: usize },
    /// The response belonged to an earlier epoch or a torn-down engine.
    Discarded { epoch: Epoch },
    Failed(FetchFailure),
}

/// Which status line the host should show under the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    /// Page 1 is in flight.
    Loading,
    /// A next page is in flight.
    FetchingMore,
    /// Nothing left for this query.
    NoMoreResults,
    /// The last fetch failed; the host may retry.
    Error,
    /// Idle with more pages available.
    None,
}

pub struct CursorPaginationEngine<T> {
    page_size: u32,
    epoch: Epoch,
    query: SearchQuery,
    items: Vec<T>,
    ids: HashSet<String>,
    cursor: Option<Cursor>,
    has_next_page: bool,
    first_page_in_flight: bool,
    next_page_in_flight: bool,
    failure: Option<FetchFailure>,
    mounted: bool,
}

impl<T: Identified> CursorPaginationEngine<T> {
    pub fn new(page_size: u32) -> Self {
        CursorPaginationEngine {
            page_size: page_size.max(1),
            epoch: Epoch::default(),
            query: SearchQuery::default(),
            items: Vec::new(),
            ids: HashSet::new(),
            cursor: None,
            has_next_page: false,
            first_page_in_flight: false,
            next_page_in_flight: false,
            failure: None,
            mounted: true,
        }
    }

    /// Begin a new epoch for `query` and return the page 1 request.
    ///
    /// Everything from the previous epoch is dropped, including the
    /// in-flight flags: their responses will be discarded on arrival.
    pub fn start(&mut self, query: SearchQuery) -> FetchRequest {
        self.epoch = self.epoch.next();
        self.query = query;
        self.reset_results();
        self.first_page_in_flight = true;
        self.mounted = true;

        tracing::debug!(epoch = %self.epoch, term = %self.query.term, "starting search epoch");

        FetchRequest {
            epoch: self.epoch,
            kind: FetchKind::FirstPage,
            page: PageRequest {
                term: self.query.term.clone(),
                page_size: self.page_size,
                after: None,
            },
        }
    }

    /// Request the page after the current cursor.
    ///
    /// Returns `None` when there is nothing to fetch or a fetch for this
    /// epoch is already outstanding, so jittery triggers can call it freely.
    pub fn load_more(&mut self) -> Option<FetchRequest> {
        if !self.mounted || !self.has_next_page {
            return None;
        }
        if self.first_page_in_flight || self.next_page_in_flight {
            tracing::trace!(epoch = %self.epoch, "load_more ignored: fetch in flight");
            return None;
        }

        self.next_page_in_flight = true;
        tracing::debug!(epoch = %self.epoch, after = ?self.cursor, "loading next page");

        Some(FetchRequest {
            epoch: self.epoch,
            kind: FetchKind::NextPage,
            page: PageRequest {
                term: self.query.term.clone(),
                page_size: self.page_size,
                after: self.cursor.clone(),
            },
        })
    }

    /// Fold a completed fetch into the result set.
    pub fn apply(&mut self, response: FetchResponse<T>) -> ApplyOutcome {
        let expected = match response.kind {
            FetchKind::FirstPage => self.first_page_in_flight,
            FetchKind::NextPage => self.next_page_in_flight,
        };
        if !self.mounted || response.epoch != self.epoch || !expected {
            tracing::debug!(
                response_epoch = %response.epoch,
                current_epoch = %self.epoch,
                kind = %response.kind,
                "discarding stale response"
            );
            return ApplyOutcome::Discarded {
                epoch: response.epoch,
            };
        }

        match response.kind {
            FetchKind::FirstPage => self.first_page_in_flight = false,
            FetchKind::NextPage => self.next_page_in_flight = false,
        }

        match response.result {
            Ok(page) => {
                self.failure = None;
                let count = page.edges.len();
                let skipped = self.merge(page);
                match response.kind {
                    FetchKind::FirstPage => ApplyOutcome::FirstPage { count },
                    FetchKind::NextPage => ApplyOutcome::Appended {
                        count: count - skipped,
                        skipped,
                    },
                }
            }
            Err(e) => {
                tracing::warn!(epoch = %self.epoch, kind = %response.kind, "search fetch failed: {e}");
                if response.kind == FetchKind::FirstPage {
                    self.reset_results();
                }
                // A failed next page leaves has_next_page alone so the host can retry.
                let failure = FetchFailure {
                    kind: response.kind,
                    epoch: self.epoch,
                    message: e.to_string(),
                };
                self.failure = Some(failure.clone());
                ApplyOutcome::Failed(failure)
            }
        }
    }

    /// Drop the result set and ignore every response still in flight.
    pub fn teardown(&mut self) {
        self.mounted = false;
        self.epoch = self.epoch.next();
        self.reset_results();
        self.first_page_in_flight = false;
        self.next_page_in_flight = false;
    }

    /// Append a page, skipping ids already present. Returns how many were skipped.
    fn merge(&mut self, page: ResultPage<T>) -> usize {
        let mut skipped = 0;
        for item in page.edges {
            if self.ids.insert(item.id().to_owned()) {
                self.items.push(item);
            } else {
                tracing::debug!(id = item.id(), epoch = %self.epoch, "skipping duplicate item");
                skipped += 1;
            }
        }

        self.has_next_page = page.has_next_page;
        self.cursor = page.end_cursor;
        if self.has_next_page && self.cursor.is_none() {
            tracing::warn!(epoch = %self.epoch, "page claims more results but has no cursor");
            self.has_next_page = false;
        }
        skipped
    }

    fn reset_results(&mut self) {
        self.items.clear();
        self.ids.clear();
        self.cursor = None;
        self.has_next_page = false;
        self.next_page_in_flight = false;
        self.failure = None;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn last_item(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn has_next_page(&self) -> bool {
        self.has_next_page
    }

    /// Page 1 is in flight.
    pub fn is_loading(&self) -> bool {
        self.first_page_in_flight
    }

    /// A next page is in flight.
    pub fn is_fetching_more(&self) -> bool {
        self.next_page_in_flight
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        self.failure.as_ref()
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }

    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn indicator(&self) -> Indicator {
        if self.first_page_in_flight {
            Indicator::Loading
        } else if self.next_page_in_flight {
            Indicator::FetchingMore
        } else if self.failure.is_some() {
            Indicator::Error
        } else if !self.has_next_page {
            Indicator::NoMoreResults
        } else {
            Indicator::None
        }
    }
}

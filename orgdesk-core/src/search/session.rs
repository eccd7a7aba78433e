//! Drives a pagination engine against a page source on a single task.

use std::future::Future;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};

use super::engine::{ApplyOutcome, CursorPaginationEngine, Indicator};
use super::page::{
    FetchFailure, FetchRequest, FetchResponse, Identified, PageRequest, ResultPage,
};
use super::term::SearchTermController;
use super::trigger::LoadMore;
use crate::error::OrgDeskResult;

/// Where pages come from.
pub trait PageSource {
    type Item: Identified;

    /// Fetch one page. Items must come back in a stable order for a fixed
    /// term across increasing cursors.
    fn fetch_page(
        &self,
        request: &PageRequest,
    ) -> impl Future<Output = OrgDeskResult<ResultPage<Self::Item>>>;
}

/// A search term controller, an engine and the fetches it has in flight.
///
/// Fetches run concurrently but are only ever applied from `next_outcome`,
/// so the engine sees one completion at a time, in arrival order.
pub struct SearchSession<S: PageSource> {
    source: Rc<S>,
    terms: SearchTermController,
    engine: CursorPaginationEngine<S::Item>,
    in_flight: FuturesUnordered<LocalBoxFuture<'static, FetchResponse<S::Item>>>,
}

impl<S> SearchSession<S>
where
    S: PageSource + 'static,
    S::Item: 'static,
{
    pub fn new(source: S, page_size: u32) -> Self {
        Self::with_shared_source(Rc::new(source), page_size)
    }

    pub fn with_shared_source(source: Rc<S>, page_size: u32) -> Self {
        SearchSession {
            source,
            terms: SearchTermController::new(),
            engine: CursorPaginationEngine::new(page_size),
            in_flight: FuturesUnordered::new(),
        }
    }

    /// Start a new epoch for `term` and dispatch its first page.
    pub fn set_term(&mut self, term: impl Into<String>) {
        let query = self.terms.set_term(term);
        let request = self.engine.start(query);
        self.dispatch(request);
    }

    /// Restart the current term, e.g. after a first-page failure.
    pub fn resubmit(&mut self) {
        let term = self.terms.current().term.clone();
        self.set_term(term);
    }

    /// Dispatch the next page if the engine allows it.
    pub fn load_more(&mut self) -> bool {
        match self.engine.load_more() {
            Some(request) => {
                self.dispatch(request);
                true
            }
            None => false,
        }
    }

    fn dispatch(&mut self, request: FetchRequest) {
        let source = Rc::clone(&self.source);
        self.in_flight.push(Box::pin(async move {
            let result = source.fetch_page(&request.page).await;
            request.complete(result)
        }));
    }

    /// Wait for the next fetch to complete and apply it.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_outcome(&mut self) -> Option<ApplyOutcome> {
        let response = self.in_flight.next().await?;
        Some(self.engine.apply(response))
    }

    /// Apply every in-flight fetch, returning the last failure of the
    /// current epoch, if any.
    pub async fn settle(&mut self) -> Option<FetchFailure> {
        let mut failure = None;
        while let Some(outcome) = self.next_outcome().await {
            if let ApplyOutcome::Failed(f) = outcome {
                failure = Some(f);
            }
        }
        failure
    }

    /// Release the result set. Fetches still in flight are dropped.
    pub fn teardown(&mut self) {
        self.engine.teardown();
        self.in_flight = FuturesUnordered::new();
    }

    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    pub fn items(&self) -> &[S::Item] {
        self.engine.items()
    }

    pub fn term(&self) -> &str {
        &self.terms.current().term
    }

    pub fn indicator(&self) -> Indicator {
        self.engine.indicator()
    }

    pub fn engine(&self) -> &CursorPaginationEngine<S::Item> {
        &self.engine
    }
}

impl<S> LoadMore for SearchSession<S>
where
    S: PageSource + 'static,
    S::Item: 'static,
{
    fn has_next_page(&self) -> bool {
        self.engine.has_next_page()
    }

    fn load_more(&mut self) -> bool {
        SearchSession::load_more(self)
    }
}

//! Incremental cursor-paginated search.
//!
//! A `SearchSession` pairs a `SearchTermController` with a
//! `CursorPaginationEngine` and runs its fetches against a `PageSource`.
//! A `SearchPanel` adds one of the viewport triggers, which decide when
//! the next page is needed.

mod directory;
mod engine;
mod page;
mod panel;
mod session;
mod term;
pub mod trigger;

#[cfg(test)]
pub(crate) mod testing;

pub use directory::UserDirectory;
pub use engine::{ApplyOutcome, CursorPaginationEngine, Indicator};
pub use page::{
    Cursor, Epoch, FetchFailure, FetchKind, FetchRequest, FetchResponse, Identified, PageRequest,
    ResultPage, SearchQuery,
};
pub use panel::SearchPanel;
pub use session::{PageSource, SearchSession};
pub use term::SearchTermController;
pub use trigger::{IntersectionTrigger, LoadMore, ScrollMetrics, ScrollTrigger, ViewportTrigger};

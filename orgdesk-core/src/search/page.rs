//! Values exchanged between the pagination engine and its page source.

use std::fmt;

use crate::error::OrgDeskResult;

/// Anything with an id that is unique within one query epoch.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for crate::event::User {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Opaque continuation token handed out by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cursor(String);

impl Cursor {
    pub fn new(token: impl Into<String>) -> Self {
        Cursor(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of one query lifetime. Strictly increasing per engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    pub fn next(self) -> Self {
        Epoch(self.0.wrapping_add(1))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The filter a result set was fetched for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchQuery {
    pub term: String,
}

impl SearchQuery {
    pub fn new(term: impl Into<String>) -> Self {
        SearchQuery { term: term.into() }
    }
}

/// One page as returned by the source, in server order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultPage<T> {
    pub edges: Vec<T>,
    pub end_cursor: Option<Cursor>,
    pub has_next_page: bool,
}

impl<T> ResultPage<T> {
    /// A final page: nothing follows it.
    pub fn last(edges: Vec<T>) -> Self {
        ResultPage {
            edges,
            end_cursor: None,
            has_next_page: false,
        }
    }

    /// A page followed by more, reachable from `end_cursor`.
    pub fn more(edges: Vec<T>, end_cursor: impl Into<String>) -> Self {
        ResultPage {
            edges,
            end_cursor: Some(Cursor::new(end_cursor)),
            has_next_page: true,
        }
    }
}

/// What to ask the source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub term: String,
    pub page_size: u32,
    pub after: Option<Cursor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    FirstPage,
    NextPage,
}

impl fmt::Display for FetchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchKind::FirstPage => f.write_str("first page"),
            FetchKind::NextPage => f.write_str("next page"),
        }
    }
}

/// An outstanding fetch, tagged with the epoch that issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub epoch: Epoch,
    pub kind: FetchKind,
    pub page: PageRequest,
}

impl FetchRequest {
    /// Pair this request with the source's answer.
    pub fn complete<T>(self, result: OrgDeskResult<ResultPage<T>>) -> FetchResponse<T> {
        FetchResponse {
            epoch: self.epoch,
            kind: self.kind,
            result,
        }
    }
}

/// A completed fetch, still carrying the epoch of its request.
#[derive(Debug)]
pub struct FetchResponse<T> {
    pub epoch: Epoch,
    pub kind: FetchKind,
    pub result: OrgDeskResult<ResultPage<T>>,
}

/// A fetch that failed, kept on the engine for the host to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FetchKind,
    pub epoch: Epoch,
    pub message: String,
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to load {}: {}", self.kind, self.message)
    }
}

//! Scripted page source for search tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use super::page::{Cursor, PageRequest, ResultPage};
use super::session::PageSource;
use crate::error::{OrgDeskError, OrgDeskResult};
use crate::event::User;

type Key = (String, Option<String>);

struct Scripted {
    delay: Duration,
    outcome: Result<ResultPage<User>, String>,
}

/// Answers `(term, after)` lookups from a script, optionally after a delay.
///
/// Pair with `#[tokio::test(start_paused = true)]` so delays only decide
/// the order in which responses arrive.
#[derive(Default)]
pub(crate) struct ScriptedSource {
    script: RefCell<HashMap<Key, VecDeque<Scripted>>>,
    calls: RefCell<Vec<PageRequest>>,
}

pub(crate) fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {id}"),
        email: format!("{}@example.com", id.to_lowercase()),
    }
}

pub(crate) fn user_ids(items: &[User]) -> Vec<&str> {
    items.iter().map(|u| u.id.as_str()).collect()
}

impl ScriptedSource {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(self, term: &str, after: Option<&str>, ids: &[&str], end: Option<&str>) -> Self {
        self.delayed_page(term, after, ids, end, Duration::ZERO)
    }

    pub(crate) fn delayed_page(
        self,
        term: &str,
        after: Option<&str>,
        ids: &[&str],
        end: Option<&str>,
        delay: Duration,
    ) -> Self {
        let page = ResultPage {
            edges: ids.iter().map(|id| user(id)).collect(),
            end_cursor: end.map(Cursor::new),
            has_next_page: end.is_some(),
        };
        self.push(term, after, delay, Ok(page))
    }

    pub(crate) fn failing_page(self, term: &str, after: Option<&str>, error: &str) -> Self {
        self.push(term, after, Duration::ZERO, Err(error.to_string()))
    }

    fn push(
        self,
        term: &str,
        after: Option<&str>,
        delay: Duration,
        outcome: Result<ResultPage<User>, String>,
    ) -> Self {
        self.script
            .borrow_mut()
            .entry((term.to_string(), after.map(str::to_string)))
            .or_default()
            .push_back(Scripted { delay, outcome });
        self
    }

    pub(crate) fn calls(&self) -> Vec<PageRequest> {
        self.calls.borrow().clone()
    }
}

impl PageSource for ScriptedSource {
    type Item = User;

    async fn fetch_page(&self, request: &PageRequest) -> OrgDeskResult<ResultPage<User>> {
        self.calls.borrow_mut().push(request.clone());

        let key = (
            request.term.clone(),
            request.after.as_ref().map(|c| c.as_str().to_string()),
        );
        let scripted = self
            .script
            .borrow_mut()
            .get_mut(&key)
            .and_then(|queue| queue.pop_front());

        let Some(scripted) = scripted else {
            return Err(OrgDeskError::Backend(format!("no scripted page for {key:?}")));
        };

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }

        scripted.outcome.map_err(OrgDeskError::Network)
    }
}

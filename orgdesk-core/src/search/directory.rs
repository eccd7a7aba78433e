//! The user directory as a page source.

use std::rc::Rc;

use super::page::{Cursor, PageRequest, ResultPage};
use super::session::PageSource;
use crate::error::OrgDeskResult;
use crate::event::User;
use crate::protocol::{Connection, SearchUsers};
use crate::transport::Transport;

impl<T> From<Connection<T>> for ResultPage<T> {
    fn from(connection: Connection<T>) -> Self {
        ResultPage {
            edges: connection.edges.into_iter().map(|edge| edge.node).collect(),
            end_cursor: connection.page_info.end_cursor.map(Cursor::new),
            has_next_page: connection.page_info.has_next_page,
        }
    }
}

/// Pages through `SearchUsers` on the backend.
pub struct UserDirectory<T> {
    transport: Rc<T>,
}

impl<T: Transport> UserDirectory<T> {
    pub fn new(transport: Rc<T>) -> Self {
        UserDirectory { transport }
    }
}

impl<T: Transport> PageSource for UserDirectory<T> {
    type Item = User;

    async fn fetch_page(&self, request: &PageRequest) -> OrgDeskResult<ResultPage<User>> {
        let connection = self
            .transport
            .call(SearchUsers {
                contains: request.term.clone(),
                first: request.page_size,
                after: request.after.as_ref().map(|c| c.as_str().to_string()),
            })
            .await?;

        Ok(connection.into())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::protocol::Command;
    use crate::search::session::SearchSession;
    use crate::search::testing::user_ids;
    use crate::transport::testing::CannedTransport;

    fn connection(ids: &[&str], end: Option<&str>) -> serde_json::Value {
        let edges: Vec<_> = ids
            .iter()
            .map(|id| json!({ "node": { "id": id, "name": id, "email": format!("{id}@example.com") } }))
            .collect();
        json!({
            "edges": edges,
            "pageInfo": { "endCursor": end, "hasNextPage": end.is_some() }
        })
    }

    #[tokio::test]
    async fn pages_through_search_users() {
        let transport = Rc::new(CannedTransport::default());
        transport.reply(Command::SearchUsers, connection(&["A", "B"], Some("c1")));
        transport.reply(Command::SearchUsers, connection(&["C"], None));

        let mut session = SearchSession::new(UserDirectory::new(Rc::clone(&transport)), 2);
        session.set_term("ann");
        session.settle().await;
        session.load_more();
        session.settle().await;

        assert_eq!(user_ids(session.items()), ["A", "B", "C"]);

        let calls = transport.calls(Command::SearchUsers);
        assert_eq!(calls[0], json!({ "contains": "ann", "first": 2 }));
        assert_eq!(calls[1], json!({ "contains": "ann", "first": 2, "after": "c1" }));
    }

    #[tokio::test]
    async fn backend_failure_surfaces_as_fetch_failure() {
        let transport = Rc::new(CannedTransport::default());
        transport.fail(Command::SearchUsers, "connection refused");

        let mut session = SearchSession::new(UserDirectory::new(transport), 2);
        session.set_term("ann");

        let failure = session.settle().await.expect("first page should fail");
        assert!(failure.message.contains("connection refused"));
        assert!(session.items().is_empty());
    }
}

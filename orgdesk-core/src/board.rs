//! The events list of a branch rep, refetched whenever a mutation lands.

use std::rc::Rc;

use crate::error::{OrgDeskError, OrgDeskResult};
use crate::event::{Event, Organizer};
use crate::invalidation::{InvalidationBridge, Invalidations};
use crate::protocol::EventsByBranchRep;
use crate::transport::Transport;

pub struct EventBoard<T> {
    transport: Rc<T>,
    branch_rep_id: String,
    events: Vec<Event>,
    invalidations: Invalidations,
    loaded: bool,
}

impl<T: Transport> EventBoard<T> {
    pub fn new(transport: Rc<T>, branch_rep_id: impl Into<String>, bridge: &InvalidationBridge) -> Self {
        EventBoard {
            transport,
            branch_rep_id: branch_rep_id.into(),
            events: Vec::new(),
            invalidations: bridge.subscribe(),
            loaded: false,
        }
    }

    /// Run the events query from scratch.
    pub async fn refetch(&mut self) -> OrgDeskResult<&[Event]> {
        // Anything notified before this point is covered by the fetch below.
        self.invalidations.mark_seen();

        let events = self
            .transport
            .call(EventsByBranchRep {
                branch_rep_id: self.branch_rep_id.clone(),
            })
            .await?;

        tracing::debug!(count = events.len(), branch_rep = %self.branch_rep_id, "events refetched");
        self.events = events;
        self.loaded = true;
        Ok(self.events.as_slice())
    }

    /// Refetch if never loaded or invalidated since the last fetch.
    /// Returns whether a fetch happened.
    pub async fn sync(&mut self) -> OrgDeskResult<bool> {
        if self.loaded && !self.invalidations.is_stale() {
            return Ok(false);
        }
        self.refetch().await?;
        Ok(true)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: &str) -> OrgDeskResult<&Event> {
        self.events
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| OrgDeskError::EventNotFound(id.to_string()))
    }

    pub fn organizers(&self, event_id: &str) -> OrgDeskResult<&[Organizer]> {
        Ok(self.event(event_id)?.organizers.as_slice())
    }

    /// The branch these events belong to, taken from the first event that has one.
    pub fn branch_name(&self) -> Option<&str> {
        self.events
            .iter()
            .map(|e| e.branch.name.as_str())
            .find(|name| !name.is_empty())
    }

    pub fn branch_rep_id(&self) -> &str {
        &self.branch_rep_id
    }
}

//! Mutations on events and their organizers.
//!
//! Every successful mutation is announced through the invalidation bridge;
//! the lists that show the affected data refetch on their own.

use std::rc::Rc;

use crate::error::{OrgDeskError, OrgDeskResult};
use crate::event::{Event, EventType};
use crate::invalidation::InvalidationBridge;
use crate::protocol::{AddOrganizer, CreateEvent, DeleteEvent, MutationResult, RemoveOrganizer};
use crate::transport::Transport;

pub struct EventAdmin<T> {
    transport: Rc<T>,
    bridge: InvalidationBridge,
}

impl<T: Transport> EventAdmin<T> {
    pub fn new(transport: Rc<T>, bridge: InvalidationBridge) -> Self {
        EventAdmin { transport, bridge }
    }

    pub async fn create_event(&self, name: &str, event_type: EventType) -> OrgDeskResult<Event> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OrgDeskError::Mutation("Event name cannot be empty".into()));
        }

        let event = self
            .transport
            .call(CreateEvent {
                name: name.to_string(),
                event_type,
            })
            .await
            .map_err(|e| mutation_failed("creating event", e))?;

        self.bridge.notify_changed();
        Ok(event)
    }

    /// Delete an event. Published events are locked and refused up front.
    pub async fn delete_event(&self, event: &Event) -> OrgDeskResult<()> {
        if event.published {
            return Err(OrgDeskError::Mutation(format!(
                "'{}' is published and can't be deleted",
                event.name
            )));
        }

        self.transport
            .call(DeleteEvent {
                id: event.id.clone(),
            })
            .await
            .map_err(|e| mutation_failed("deleting event", e))?;

        self.bridge.notify_changed();
        Ok(())
    }

    pub async fn add_organizer(&self, event_id: &str, user_id: &str) -> OrgDeskResult<()> {
        let result = self
            .transport
            .call(AddOrganizer {
                event_id: event_id.to_string(),
                user_id: user_id.to_string(),
            })
            .await
            .map_err(|e| mutation_failed("adding organizer", e))?;

        self.finish("adding organizer", result)
    }

    pub async fn remove_organizer(&self, event_id: &str, user_id: &str) -> OrgDeskResult<()> {
        let result = self
            .transport
            .call(RemoveOrganizer {
                event_id: event_id.to_string(),
                user_id: user_id.to_string(),
            })
            .await
            .map_err(|e| mutation_failed("removing organizer", e))?;

        self.finish("removing organizer", result)
    }

    fn finish(&self, action: &str, result: MutationResult) -> OrgDeskResult<()> {
        match result {
            MutationResult::Success => {
                self.bridge.notify_changed();
                Ok(())
            }
            MutationResult::Error { message } => {
                Err(OrgDeskError::Mutation(format!("Error {action}: {message}")))
            }
        }
    }
}

fn mutation_failed(action: &str, err: OrgDeskError) -> OrgDeskError {
    tracing::warn!("{action} failed: {err}");
    match err {
        OrgDeskError::Mutation(_) => err,
        other => OrgDeskError::Mutation(format!("Error {action}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::event::Branch;
    use crate::protocol::Command;
    use crate::transport::testing::CannedTransport;

    fn admin() -> (Rc<CannedTransport>, InvalidationBridge, EventAdmin<CannedTransport>) {
        let transport = Rc::new(CannedTransport::default());
        let bridge = InvalidationBridge::new();
        let admin = EventAdmin::new(Rc::clone(&transport), bridge.clone());
        (transport, bridge, admin)
    }

    fn event(published: bool) -> Event {
        Event {
            id: "7".into(),
            name: "Quiz".into(),
            event_type: EventType::Individual,
            published,
            branch: Branch { name: "ECE".into() },
            organizers: Vec::new(),
        }
    }

    #[tokio::test]
    async fn successful_add_notifies_lists() {
        let (transport, bridge, admin) = admin();
        let list = bridge.subscribe();
        transport.reply(Command::AddOrganizer, json!({ "outcome": "success" }));

        admin.add_organizer("7", "u1").await.unwrap();

        assert!(list.is_stale());
        assert_eq!(
            transport.calls(Command::AddOrganizer)[0],
            json!({ "event_id": "7", "user_id": "u1" })
        );
    }

    #[tokio::test]
    async fn in_band_error_is_a_mutation_failure_without_notify() {
        let (transport, bridge, admin) = admin();
        let list = bridge.subscribe();
        transport.reply(
            Command::AddOrganizer,
            json!({ "outcome": "error", "message": "already an organizer" }),
        );

        let err = admin.add_organizer("7", "u1").await.unwrap_err();

        assert!(matches!(err, OrgDeskError::Mutation(ref m) if m.contains("already an organizer")));
        assert!(!list.is_stale());
    }

    #[tokio::test]
    async fn transport_failure_is_reported_as_mutation_failure() {
        let (transport, _bridge, admin) = admin();
        transport.fail(Command::RemoveOrganizer, "connection reset");

        let err = admin.remove_organizer("7", "u1").await.unwrap_err();
        assert!(matches!(err, OrgDeskError::Mutation(_)));
    }

    #[tokio::test]
    async fn published_events_are_not_deleted() {
        let (transport, bridge, admin) = admin();
        let list = bridge.subscribe();

        assert!(admin.delete_event(&event(true)).await.is_err());
        assert!(transport.calls(Command::DeleteEvent).is_empty());
        assert!(!list.is_stale());

        transport.reply(Command::DeleteEvent, serde_json::Value::Null);
        admin.delete_event(&event(false)).await.unwrap();
        assert!(list.is_stale());
    }

    #[tokio::test]
    async fn create_event_trims_and_rejects_blank_names() {
        let (transport, _bridge, admin) = admin();
        assert!(admin.create_event("   ", EventType::Team).await.is_err());

        transport.reply(
            Command::CreateEvent,
            json!({
                "id": "8",
                "name": "Robo Race",
                "eventType": "TEAM",
                "published": false,
                "branch": { "name": "ECE" }
            }),
        );
        let created = admin.create_event("  Robo Race ", EventType::Team).await.unwrap();

        assert_eq!(created.id, "8");
        assert_eq!(
            transport.calls(Command::CreateEvent)[0],
            json!({ "name": "Robo Race", "event_type": "TEAM" })
        );
    }
}

//! Defines the JSON protocol spoken with the event backend.
//!
//! Every call is a `Request { command, params }` envelope; the backend
//! answers with a `Response` tagged by `status`.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::event::{Event, EventType, User};

pub trait BackendCommand: Serialize {
    type Response: DeserializeOwned;
    fn command() -> Command;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    SearchUsers,
    EventsByBranchRep,
    CreateEvent,
    DeleteEvent,
    AddOrganizer,
    RemoveOrganizer,
}

/// Request sent to the backend.
#[derive(Debug, Serialize, Deserialize)]
pub struct Request {
    pub command: Command,
    #[serde(default)]
    pub params: serde_json::Value,
}

/// Response sent back by the backend.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Response<T> {
    Success { data: T },
    Error { error: String },
}

// ============================================================================
// Connection Types
// ============================================================================

/// Cursor-paginated list, as returned by connection-style queries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub end_cursor: Option<String>,
    #[serde(default)]
    pub has_next_page: bool,
}

/// Outcome of an organizer mutation.
///
/// The backend reports domain failures (e.g. user already an organizer)
/// in-band rather than as an error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MutationResult {
    Success,
    Error { message: String },
}

// ============================================================================
// Queries
// ============================================================================

/// Search the user directory by name, one page at a time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchUsers {
    pub contains: String,
    pub first: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
}

impl BackendCommand for SearchUsers {
    type Response = Connection<User>;
    fn command() -> Command {
        Command::SearchUsers
    }
}

/// List the events owned by a branch rep, organizers included.
#[derive(Debug, Serialize, Deserialize)]
pub struct EventsByBranchRep {
    pub branch_rep_id: String,
}

impl BackendCommand for EventsByBranchRep {
    type Response = Vec<Event>;
    fn command() -> Command {
        Command::EventsByBranchRep
    }
}

// ============================================================================
// Mutations
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEvent {
    pub name: String,
    pub event_type: EventType,
}

impl BackendCommand for CreateEvent {
    type Response = Event;
    fn command() -> Command {
        Command::CreateEvent
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteEvent {
    pub id: String,
}

impl BackendCommand for DeleteEvent {
    type Response = ();
    fn command() -> Command {
        Command::DeleteEvent
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddOrganizer {
    pub event_id: String,
    pub user_id: String,
}

impl BackendCommand for AddOrganizer {
    type Response = MutationResult;
    fn command() -> Command {
        Command::AddOrganizer
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RemoveOrganizer {
    pub event_id: String,
    pub user_id: String,
}

impl BackendCommand for RemoveOrganizer {
    type Response = MutationResult;
    fn command() -> Command {
        Command::RemoveOrganizer
    }
}

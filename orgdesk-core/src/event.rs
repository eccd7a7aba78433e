//! Event and directory types.
//!
//! These mirror what the backend returns for the branch-rep dashboard:
//! events with their organizers, and users from the searchable directory.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user from the directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A user assigned as organizer of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub user: User,
}

/// The branch an event belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Individual,
    Team,
    IndividualMultipleEntry,
    TeamMultipleEntry,
}

impl EventType {
    pub const ALL: [EventType; 4] = [
        EventType::Individual,
        EventType::Team,
        EventType::IndividualMultipleEntry,
        EventType::TeamMultipleEntry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Individual => "INDIVIDUAL",
            EventType::Team => "TEAM",
            EventType::IndividualMultipleEntry => "INDIVIDUAL_MULTIPLE_ENTRY",
            EventType::TeamMultipleEntry => "TEAM_MULTIPLE_ENTRY",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EventType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        EventType::ALL
            .into_iter()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                let known: Vec<_> = EventType::ALL.iter().map(|t| t.as_str()).collect();
                format!("Unknown event type '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}

/// An event managed by a branch rep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub event_type: EventType,
    /// Published events are locked: they can't be deleted from the dashboard.
    pub published: bool,
    pub branch: Branch,
    #[serde(default)]
    pub organizers: Vec<Organizer>,
}

impl Event {
    pub fn has_organizer(&self, user_id: &str) -> bool {
        self.organizers.iter().any(|o| o.user.id == user_id)
    }
}

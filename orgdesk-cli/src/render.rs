//! Terminal rendering for orgdesk types.
//!
//! Extension traits that add colored output to orgdesk-core types using
//! owo_colors.

use orgdesk_core::search::Indicator;
use orgdesk_core::{Event, EventType, Organizer, User};
use owo_colors::OwoColorize;

pub trait Render {
    fn render(&self) -> String;
}

impl Render for EventType {
    fn render(&self) -> String {
        let label = match self {
            EventType::Individual => "individual",
            EventType::Team => "team",
            EventType::IndividualMultipleEntry => "individual, multiple entry",
            EventType::TeamMultipleEntry => "team, multiple entry",
        };
        label.dimmed().to_string()
    }
}

impl Render for Event {
    fn render(&self) -> String {
        let status = if self.published {
            "Published".green().to_string()
        } else {
            "Pending".yellow().to_string()
        };
        let organizers = format!(
            "{} {}",
            self.organizers.len(),
            pluralize("organizer", self.organizers.len())
        );

        format!(
            "{:>4}  {}  {} {} {}",
            self.id.dimmed(),
            self.name.bold(),
            status,
            self.event_type.render(),
            organizers.dimmed()
        )
    }
}

impl Render for User {
    fn render(&self) -> String {
        format!("{} {}", self.name, format!("<{}>", self.email).dimmed())
    }
}

impl Render for Organizer {
    fn render(&self) -> String {
        self.user.render()
    }
}

impl Render for Indicator {
    fn render(&self) -> String {
        match self {
            Indicator::Loading => "Loading users...".to_string(),
            Indicator::FetchingMore => "Fetching more users...".to_string(),
            Indicator::NoMoreResults => "no more users to show".dimmed().to_string(),
            Indicator::Error => "Couldn't load users".red().to_string(),
            Indicator::None => String::new(),
        }
    }
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{word}s")
    }
}

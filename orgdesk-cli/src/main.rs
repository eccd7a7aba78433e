mod commands;
mod render;
mod telemetry;
mod utils;

use anyhow::Result;
use clap::{Parser, Subcommand};
use orgdesk_core::EventType;
use orgdesk_core::config::OrgDeskConfig;

use commands::Backend;

#[derive(Parser)]
#[command(name = "orgdesk")]
#[command(about = "Manage your branch's events and find organizers in the user directory")]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Branch rep whose events to work with (defaults to branch_rep_id in config)
    #[arg(long, global = true)]
    branch_rep: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the branch's events
    Events,
    /// Create or delete an event
    Event {
        #[command(subcommand)]
        action: EventAction,
    },
    /// List the organizers of an event
    Organizers { event_id: String },
    /// Add or remove an organizer
    Organizer {
        #[command(subcommand)]
        action: OrganizerAction,
    },
    /// Search the user directory
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Show or change configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum EventAction {
    New {
        name: Option<String>,

        /// INDIVIDUAL, TEAM, INDIVIDUAL_MULTIPLE_ENTRY or TEAM_MULTIPLE_ENTRY
        #[arg(short = 't', long = "type")]
        event_type: Option<EventType>,
    },
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Subcommand)]
enum OrganizerAction {
    Add { event_id: String, user_id: String },
    Remove { event_id: String, user_id: String },
}

#[derive(Subcommand)]
enum UsersAction {
    /// Print matching users, one page at a time
    Search {
        #[arg(default_value = "")]
        term: String,

        /// How many pages to fetch
        #[arg(short, long, default_value_t = 1)]
        pages: u32,

        /// Override search.page_size
        #[arg(long)]
        page_size: Option<u32>,
    },
    /// Scroll through the directory interactively
    Browse {
        /// Offer to add the selected user as organizer of this event
        #[arg(short, long)]
        event: Option<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Remember the default branch rep
    BranchRep { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(cli.verbose);

    let config = OrgDeskConfig::load()?;
    let backend = Backend::connect(config, cli.branch_rep)?;

    match cli.command {
        Commands::Events => commands::events::run(&backend).await,
        Commands::Event { action } => match action {
            EventAction::New { name, event_type } => {
                commands::event::create(&backend, name, event_type).await
            }
            EventAction::Delete { id, force } => commands::event::delete(&backend, &id, force).await,
        },
        Commands::Organizers { event_id } => commands::organizers::list(&backend, &event_id).await,
        Commands::Organizer { action } => match action {
            OrganizerAction::Add { event_id, user_id } => {
                commands::organizers::add(&backend, &event_id, &user_id).await
            }
            OrganizerAction::Remove { event_id, user_id } => {
                commands::organizers::remove(&backend, &event_id, &user_id).await
            }
        },
        Commands::Users { action } => match action {
            UsersAction::Search {
                term,
                pages,
                page_size,
            } => commands::users::search(&backend, &term, pages, page_size).await,
            UsersAction::Browse { event } => commands::users::browse(&backend, event.as_deref()).await,
        },
        Commands::Config { action } => match action {
            None => commands::config::show(&backend),
            Some(ConfigAction::BranchRep { id }) => commands::config::set_branch_rep(&backend, id),
        },
    }
}

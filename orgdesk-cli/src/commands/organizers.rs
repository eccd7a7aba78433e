use anyhow::Result;
use orgdesk_core::board::EventBoard;
use orgdesk_core::transport::HttpTransport;
use owo_colors::OwoColorize;

use super::{Backend, sync_board};
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn list(backend: &Backend, event_id: &str) -> Result<()> {
    let mut board = backend.board()?;
    sync_board(&mut board).await?;
    print_organizers(&board, event_id)
}

pub async fn add(backend: &Backend, event_id: &str, user_id: &str) -> Result<()> {
    // Subscribed before the mutation, so the success below marks it stale.
    let mut board = backend.board()?;

    let spinner = create_spinner("Adding organizer...");
    let result = backend.admin().add_organizer(event_id, user_id).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", "  Organizer added".green());
    sync_board(&mut board).await?;
    print_organizers(&board, event_id)
}

pub async fn remove(backend: &Backend, event_id: &str, user_id: &str) -> Result<()> {
    let mut board = backend.board()?;

    let spinner = create_spinner("Removing organizer...");
    let result = backend.admin().remove_organizer(event_id, user_id).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", "  Organizer removed".red());
    sync_board(&mut board).await?;
    print_organizers(&board, event_id)
}

pub fn print_organizers(board: &EventBoard<HttpTransport>, event_id: &str) -> Result<()> {
    let event = board.event(event_id)?;
    println!("{}", event.render());

    if event.organizers.is_empty() {
        println!("      {}", "No organizers yet".dimmed());
    }
    for organizer in &event.organizers {
        println!("      {}", organizer.render());
    }

    Ok(())
}

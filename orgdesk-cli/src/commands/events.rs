use anyhow::Result;
use orgdesk_core::board::EventBoard;
use orgdesk_core::transport::HttpTransport;
use owo_colors::OwoColorize;

use super::{Backend, sync_board};
use crate::render::Render;

pub async fn run(backend: &Backend) -> Result<()> {
    let mut board = backend.board()?;
    sync_board(&mut board).await?;
    print_board(&board);
    Ok(())
}

pub fn print_board(board: &EventBoard<HttpTransport>) {
    let heading = match board.branch_name() {
        Some(branch) => format!("Events for {branch}"),
        None => format!("Events for branch rep {}", board.branch_rep_id()),
    };
    println!("{}", heading.bold());

    if board.events().is_empty() {
        println!("  {}", "No events registered".dimmed());
        return;
    }

    for event in board.events() {
        println!("  {}", event.render());
    }

    let published = board.events().iter().filter(|e| e.published).count();
    println!(
        "\n  {}",
        format!(
            "{} published, {} pending",
            published,
            board.events().len() - published
        )
        .dimmed()
    );
}

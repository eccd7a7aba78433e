use anyhow::{Context, Result};
use dialoguer::{Confirm, Input, Select};
use orgdesk_core::EventType;
use owo_colors::OwoColorize;

use super::{Backend, sync_board};
use crate::render::Render;
use crate::utils::tui::create_spinner;

pub async fn create(
    backend: &Backend,
    name: Option<String>,
    event_type: Option<EventType>,
) -> Result<()> {
    let interactive = name.is_none() || event_type.is_none();

    let name = match name {
        Some(n) => n,
        None => Input::<String>::new()
            .with_prompt("  Event name")
            .interact_text()?,
    };

    let event_type = match event_type {
        Some(t) => t,
        None => {
            let labels: Vec<String> = EventType::ALL.iter().map(|t| t.render()).collect();
            let selection = Select::new()
                .with_prompt("  Type")
                .items(&labels)
                .default(0)
                .interact()?;
            EventType::ALL[selection]
        }
    };

    let spinner = create_spinner("Creating event...");
    let result = backend.admin().create_event(&name, event_type).await;
    spinner.finish_and_clear();
    let event = result?;

    if interactive {
        println!();
    }
    println!("{}", format!("  Created: {} (id {})", event.name, event.id).green());

    Ok(())
}

pub async fn delete(backend: &Backend, id: &str, force: bool) -> Result<()> {
    let mut board = backend.board()?;
    sync_board(&mut board).await?;

    let event = board
        .event(id)
        .with_context(|| format!("No event '{id}' for branch rep {}", board.branch_rep_id()))?
        .clone();

    if event.published {
        anyhow::bail!("'{}' is published and can't be deleted", event.name);
    }

    if !force {
        println!("{}", event.render());
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete '{}'?", event.name))
            .default(false)
            .interact()?;

        if !confirmed {
            return Ok(());
        }
    }

    let spinner = create_spinner("Deleting event...");
    let result = backend.admin().delete_event(&event).await;
    spinner.finish_and_clear();
    result?;

    println!("{}", format!("  Deleted: {}", event.name).red());

    sync_board(&mut board).await?;
    println!(
        "{}",
        format!("  {} events left", board.events().len()).dimmed()
    );

    Ok(())
}

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use orgdesk_core::User;
use orgdesk_core::admin::EventAdmin;
use orgdesk_core::board::EventBoard;
use orgdesk_core::search::{
    FetchFailure, Indicator, ScrollTrigger, SearchPanel, SearchSession, UserDirectory,
};
use orgdesk_core::transport::HttpTransport;
use owo_colors::OwoColorize;

use super::{Backend, sync_board};
use crate::render::Render;
use crate::utils::tui::create_spinner;
use crate::utils::viewport::TerminalViewport;

type DirectorySession = SearchSession<UserDirectory<HttpTransport>>;
type BrowsePanel = SearchPanel<UserDirectory<HttpTransport>, ScrollTrigger>;

pub async fn search(backend: &Backend, term: &str, pages: u32, page_size: Option<u32>) -> Result<()> {
    let page_size = page_size.unwrap_or(backend.config().search.page_size).max(1);
    let mut session = SearchSession::new(backend.directory(), page_size);

    session.set_term(term);
    if let Some(failure) = settle_session(&mut session).await {
        anyhow::bail!("Search failed: {failure}");
    }

    let mut fetched = 1;
    let mut failure = None;
    while fetched < pages && session.load_more() {
        failure = settle_session(&mut session).await;
        if failure.is_some() {
            break;
        }
        fetched += 1;
    }

    if session.items().is_empty() {
        println!("{}", format!("No users match '{term}'").dimmed());
    }
    for user in session.items() {
        println!("  {}", user.render());
    }

    if let Some(failure) = failure {
        println!("  {}", failure.to_string().red());
    } else if session.indicator() == Indicator::NoMoreResults {
        println!("  {}", session.indicator().render());
    } else {
        println!(
            "  {}",
            format!("more users available, fetch them with --pages {}", fetched + 1).dimmed()
        );
    }

    Ok(())
}

async fn settle_session(session: &mut DirectorySession) -> Option<FetchFailure> {
    let spinner = create_spinner(session.indicator().render());
    let failure = session.settle().await;
    spinner.finish_and_clear();
    failure
}

enum Action {
    Pick(usize),
    ScrollUp,
    ScrollDown,
    Search,
    Retry,
    Quit,
}

pub async fn browse(backend: &Backend, event_id: Option<&str>) -> Result<()> {
    let settings = backend.config().search.clone();

    let mut board = match event_id {
        Some(id) => {
            let mut board = backend.board()?;
            sync_board(&mut board).await?;
            board.event(id)?;
            Some(board)
        }
        None => None,
    };
    let admin = backend.admin();

    let session = SearchSession::new(backend.directory(), settings.panel_page_size);
    let mut panel = SearchPanel::new(session, ScrollTrigger::new(settings.scroll_tolerance));
    let mut viewport = TerminalViewport::new(settings.viewport_rows);

    panel.mount();
    report(settle_panel(&mut panel).await);

    loop {
        let total = panel.items().len();
        let window = viewport.visible(total);
        let at_bottom = viewport.metrics(total).at_bottom(settings.scroll_tolerance);
        let event = match (&board, event_id) {
            (Some(board), Some(id)) => board.event(id).ok(),
            _ => None,
        };

        let mut labels = Vec::new();
        let mut actions = Vec::new();
        for index in window.clone() {
            let user = &panel.items()[index];
            let mut label = user.render();
            if event.is_some_and(|e| e.has_organizer(&user.id)) {
                label.push_str(&format!(" {}", "organizer".green()));
            }
            labels.push(label);
            actions.push(Action::Pick(index));
        }
        if !viewport.at_top() {
            labels.push("↑ Scroll up".to_string());
            actions.push(Action::ScrollUp);
        }
        if !at_bottom || panel.session().engine().has_next_page() {
            labels.push("↓ Scroll down".to_string());
            actions.push(Action::ScrollDown);
        }
        if panel.indicator() == Indicator::Error {
            labels.push("Retry".to_string());
            actions.push(Action::Retry);
        }
        labels.push("Search...".to_string());
        actions.push(Action::Search);
        labels.push("Quit".to_string());
        actions.push(Action::Quit);

        println!();
        let term = panel.session().term();
        let heading = if term.is_empty() {
            "All users".to_string()
        } else {
            format!("Users matching '{term}'")
        };
        println!("{}", heading.bold());
        if total == 0 {
            println!("  {}", "No users found".dimmed());
        } else {
            println!(
                "  {}",
                format!("{}-{} of {} loaded", window.start + 1, window.end, total).dimmed()
            );
        }
        if at_bottom {
            let footer = panel.indicator().render();
            if !footer.is_empty() {
                println!("  {footer}");
            }
        }

        let selection = Select::new().items(&labels).default(0).interact_opt()?;
        let Some(selection) = selection else {
            break;
        };

        match actions[selection] {
            Action::Pick(index) => {
                let user = panel.items()[index].clone();
                match (board.as_mut(), event_id) {
                    (Some(board), Some(event_id)) => {
                        offer_organizer(&admin, board, event_id, &user).await?;
                    }
                    _ => {
                        println!("  {}", user.render());
                        println!("  {}", format!("id {}", user.id).dimmed());
                    }
                }
            }
            Action::ScrollUp => viewport.scroll_up(),
            Action::ScrollDown => {
                let from = viewport.visible(total).start;
                viewport.scroll_down(total);
                if panel.on_scroll(viewport.metrics(total)) {
                    report(settle_panel(&mut panel).await);
                    // Already at the bottom before: move on to the new rows.
                    if viewport.visible(total).start == from {
                        viewport.scroll_down(panel.items().len());
                    }
                }
            }
            Action::Search => {
                let term: String = Input::new()
                    .with_prompt("  Search")
                    .with_initial_text(panel.session().term())
                    .allow_empty(true)
                    .interact_text()?;
                panel.set_term(term);
                viewport.reset();
                report(settle_panel(&mut panel).await);
            }
            Action::Retry => {
                if panel.items().is_empty() {
                    let term = panel.session().term().to_string();
                    panel.set_term(term);
                } else {
                    panel.session_mut().load_more();
                }
                report(settle_panel(&mut panel).await);
            }
            Action::Quit => break,
        }
    }

    panel.unmount();
    Ok(())
}

async fn offer_organizer(
    admin: &EventAdmin<HttpTransport>,
    board: &mut EventBoard<HttpTransport>,
    event_id: &str,
    user: &User,
) -> Result<()> {
    let event = board.event(event_id)?;
    if event.has_organizer(&user.id) {
        println!("  {}", format!("{} already organizes {}", user.name, event.name).dimmed());
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt(format!("Add {} as organizer of {}?", user.name, event.name))
        .default(true)
        .interact()?;
    if !confirmed {
        return Ok(());
    }

    let spinner = create_spinner("Adding organizer...");
    let result = admin.add_organizer(event_id, &user.id).await;
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            sync_board(board).await?;
            let count = board.organizers(event_id)?.len();
            println!(
                "  {} {}",
                "Organizer added".green(),
                format!("({count} total)").dimmed()
            );
        }
        Err(e) => println!("  {}", e.to_string().red()),
    }

    Ok(())
}

async fn settle_panel(panel: &mut BrowsePanel) -> Option<FetchFailure> {
    let spinner = create_spinner(panel.indicator().render());
    let failure = panel.settle().await;
    spinner.finish_and_clear();
    failure
}

fn report(failure: Option<FetchFailure>) {
    if let Some(failure) = failure {
        println!("  {}", failure.to_string().red());
    }
}

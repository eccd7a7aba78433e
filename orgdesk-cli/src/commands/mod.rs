pub mod config;
pub mod event;
pub mod events;
pub mod organizers;
pub mod users;

use std::rc::Rc;

use anyhow::{Context, Result};
use orgdesk_core::admin::EventAdmin;
use orgdesk_core::board::EventBoard;
use orgdesk_core::config::OrgDeskConfig;
use orgdesk_core::invalidation::InvalidationBridge;
use orgdesk_core::search::UserDirectory;
use orgdesk_core::transport::HttpTransport;

use crate::utils::tui::create_spinner;

/// Everything a command needs to talk to the backend.
///
/// Boards and admins built from the same backend share one invalidation
/// bridge, so a mutation marks every board stale.
pub struct Backend {
    config: OrgDeskConfig,
    branch_rep: Option<String>,
    transport: Rc<HttpTransport>,
    bridge: InvalidationBridge,
}

impl Backend {
    pub fn connect(config: OrgDeskConfig, branch_rep: Option<String>) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        tracing::debug!(endpoint = %transport.endpoint(), "backend configured");

        Ok(Backend {
            config,
            branch_rep,
            transport: Rc::new(transport),
            bridge: InvalidationBridge::new(),
        })
    }

    pub fn config(&self) -> &OrgDeskConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &url::Url {
        self.transport.endpoint()
    }

    /// The branch rep from `--branch-rep`, falling back to the config.
    pub fn branch_rep_id(&self) -> Result<&str> {
        match self.branch_rep.as_deref().or(self.config.branch_rep_id.as_deref()) {
            Some(id) => Ok(id),
            None => anyhow::bail!(
                "No branch rep selected.\n\n\
                Pass one with:\n  \
                orgdesk --branch-rep <id> events\n\n\
                Or remember it with:\n  \
                orgdesk config branch-rep <id>"
            ),
        }
    }

    pub fn board(&self) -> Result<EventBoard<HttpTransport>> {
        let branch_rep = self.branch_rep_id()?;
        Ok(EventBoard::new(Rc::clone(&self.transport), branch_rep, &self.bridge))
    }

    pub fn admin(&self) -> EventAdmin<HttpTransport> {
        EventAdmin::new(Rc::clone(&self.transport), self.bridge.clone())
    }

    pub fn directory(&self) -> UserDirectory<HttpTransport> {
        UserDirectory::new(Rc::clone(&self.transport))
    }
}

/// Bring a board up to date behind a spinner.
pub async fn sync_board(board: &mut EventBoard<HttpTransport>) -> Result<()> {
    let spinner = create_spinner("Fetching events...");
    let result = board.sync().await;
    spinner.finish_and_clear();

    result.context("Failed to load events")?;
    Ok(())
}

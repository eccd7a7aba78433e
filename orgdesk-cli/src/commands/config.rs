use anyhow::Result;
use orgdesk_core::config::OrgDeskConfig;
use owo_colors::OwoColorize;

use super::Backend;

pub fn show(backend: &Backend) -> Result<()> {
    let config_path = OrgDeskConfig::config_path()?;
    let config = backend.config();

    println!("{}", "Paths".bold());
    println!("  Config:      {}", config_path.display());
    println!("  Endpoint:    {}", backend.endpoint());

    println!("\n{}", "Events".bold());
    println!(
        "  Branch rep:  {}",
        config.branch_rep_id.as_deref().unwrap_or("(not set)")
    );
    println!("  Timeout:     {}s", config.request_timeout_secs);

    println!("\n{}", "Search".bold());
    println!("  Page size:   {}", config.search.page_size);
    println!("  Panel page:  {}", config.search.panel_page_size);
    println!("  Panel rows:  {}", config.search.viewport_rows);

    Ok(())
}

pub fn set_branch_rep(backend: &Backend, id: String) -> Result<()> {
    let mut config = backend.config().clone();
    config.branch_rep_id = Some(id);
    config.save()?;

    println!(
        "{}",
        format!(
            "  Default branch rep set to {}",
            config.branch_rep_id.as_deref().unwrap_or_default()
        )
        .green()
    );
    Ok(())
}

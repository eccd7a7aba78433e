//! Global orgdesk configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{OrgDeskError, OrgDeskResult};

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:4000";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Configuration at ~/.config/orgdesk/config.toml
///
/// Every key can be overridden from the environment with an `ORGDESK_`
/// prefix, e.g. `ORGDESK_SERVER_URL` or `ORGDESK_SEARCH__PAGE_SIZE`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrgDeskConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Branch rep whose events are listed when no `--branch-rep` is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_rep_id: Option<String>,

    #[serde(default)]
    pub search: SearchConfig,
}

/// Tuning for the incremental user search.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SearchConfig {
    /// Page size for full-page search listings.
    pub page_size: u32,
    /// Page size for the interactive browse panel.
    pub panel_page_size: u32,
    /// Fraction of the sentinel that must be visible before loading more.
    pub visibility_threshold: f64,
    /// Slack (in rows) when deciding that a scroll reached the bottom.
    pub scroll_tolerance: f64,
    /// Height of the browse panel, in rows.
    pub viewport_rows: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            page_size: 5,
            panel_page_size: 10,
            visibility_threshold: 1.0,
            scroll_tolerance: 1.0,
            viewport_rows: 8,
        }
    }
}

impl Default for OrgDeskConfig {
    fn default() -> Self {
        OrgDeskConfig {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout_secs(),
            branch_rep_id: None,
            search: SearchConfig::default(),
        }
    }
}

impl OrgDeskConfig {
    pub fn config_path() -> OrgDeskResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| OrgDeskError::Config("Could not determine config directory".into()))?
            .join("orgdesk");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file, creating a commented default on first run.
    pub fn load() -> OrgDeskResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> OrgDeskResult<Self> {
        Self::load_with(path, Self::environment())
    }

    /// `ORGDESK_SERVER_URL`, `ORGDESK_SEARCH__PAGE_SIZE`, ...
    fn environment() -> Environment {
        Environment::with_prefix("ORGDESK")
            .prefix_separator("_")
            .separator("__")
    }

    fn load_with(path: &Path, environment: Environment) -> OrgDeskResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| OrgDeskError::Config(e.to_string()))?
            .try_deserialize::<OrgDeskConfig>()
            .map_err(|e| OrgDeskError::Config(e.to_string()))?
            .validated()
    }

    fn validated(self) -> OrgDeskResult<Self> {
        if self.request_timeout_secs == 0 {
            return Err(OrgDeskError::Config("request_timeout_secs must be at least 1".into()));
        }
        if self.search.page_size == 0 || self.search.panel_page_size == 0 {
            return Err(OrgDeskError::Config("search page sizes must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.search.visibility_threshold) {
            return Err(OrgDeskError::Config(format!(
                "search.visibility_threshold must be between 0 and 1, got {}",
                self.search.visibility_threshold
            )));
        }
        if !(self.search.scroll_tolerance >= 0.0 && self.search.scroll_tolerance.is_finite()) {
            return Err(OrgDeskError::Config(format!(
                "search.scroll_tolerance must be a non-negative number, got {}",
                self.search.scroll_tolerance
            )));
        }
        if self.search.viewport_rows == 0 {
            return Err(OrgDeskError::Config("search.viewport_rows must be at least 1".into()));
        }
        Ok(self)
    }

    /// Save the current config to ~/.config/orgdesk/config.toml
    pub fn save(&self) -> OrgDeskResult<()> {
        let config_path = Self::config_path()?;

        let content =
            toml::to_string_pretty(self).map_err(|e| OrgDeskError::Config(e.to_string()))?;

        std::fs::write(&config_path, content)
            .map_err(|e| OrgDeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> OrgDeskResult<()> {
        let contents = format!(
            "\
# orgdesk configuration

# Event backend:
# server_url = \"{}\"
# request_timeout_secs = 10

# Branch rep whose events are listed by default:
# branch_rep_id = \"42\"

# [search]
# page_size = 5
# panel_page_size = 10
# visibility_threshold = 1.0
# scroll_tolerance = 1.0
# viewport_rows = 8
",
            DEFAULT_SERVER_URL
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                OrgDeskError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| OrgDeskError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
